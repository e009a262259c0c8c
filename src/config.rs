//! Store configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::model::Code;
use crate::labels::{self, Locale};

/// Storage key holding the highest code ever assigned.
pub const DEFAULT_COUNTER_KEY: &str = "code";

/// Options controlling how a [`Store`](crate::Store) talks to storage and
/// names new items.
///
/// Every field has a default, so partial JSON is accepted:
///
/// ```
/// use itemstore::{Locale, StoreConfig};
///
/// let config = StoreConfig::from_json(r#"{"locale": "russian"}"#).unwrap();
/// assert_eq!(config.counter_key, "code");
/// assert_eq!(config.locale, Locale::Russian);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub counter_key: String,
    pub locale: Locale,
    /// Overrides the localized "New entry" title.
    pub new_item_title: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            counter_key: DEFAULT_COUNTER_KEY.to_string(),
            locale: Locale::default(),
            new_item_title: None,
        }
    }
}

impl StoreConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the counter key cannot collide with the per-item
    /// selection keys, which are the item codes themselves.
    pub fn validate(&self) -> Result<()> {
        if self.counter_key.trim().is_empty() {
            return Err(StoreError::InvalidConfig(
                "counter_key must not be empty".to_string(),
            ));
        }
        if self.counter_key.trim().parse::<Code>().is_ok() {
            return Err(StoreError::InvalidConfig(format!(
                "counter_key `{}` collides with item code keys",
                self.counter_key
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Store the code counter under `key`. Integer keys are rejected.
    pub fn with_counter_key(mut self, key: impl Into<String>) -> Result<Self> {
        self.counter_key = key.into();
        self.validate()?;
        Ok(self)
    }

    /// Title for items created by `add_item`.
    pub fn new_item_title(&self) -> &str {
        self.new_item_title
            .as_deref()
            .unwrap_or_else(|| labels::new_entry_title(self.locale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_override_wins_over_locale() {
        let config = StoreConfig {
            new_item_title: Some("Untitled".into()),
            ..StoreConfig::default().with_locale(Locale::Russian)
        };
        assert_eq!(config.new_item_title(), "Untitled");
        assert_eq!(StoreConfig::default().new_item_title(), "New entry");
    }

    #[test]
    fn builder_overrides() {
        let config = StoreConfig::default()
            .with_counter_key("todo.code")
            .unwrap()
            .with_locale(Locale::Russian);
        assert_eq!(config.counter_key, "todo.code");
        assert_eq!(config.new_item_title(), "Новая запись");
    }

    #[test]
    fn integer_counter_keys_are_rejected() {
        for key in ["7", " 42", "-3", ""] {
            assert!(matches!(
                StoreConfig::default().with_counter_key(key),
                Err(StoreError::InvalidConfig(_))
            ));
        }
        assert!(matches!(
            StoreConfig::from_json(r#"{"counter_key": "12"}"#),
            Err(StoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn unknown_locale_is_rejected() {
        assert!(StoreConfig::from_json(r#"{"locale": "klingon"}"#).is_err());
    }
}
