use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Item;
use crate::error::Result;
use crate::labels;

/// A state value that carries a list of items.
///
/// The store only ever touches the list; everything else in the state is
/// copied over unchanged by [`with_items`](ListState::with_items).
pub trait ListState: Clone {
    /// Items currently in the list.
    fn items(&self) -> &[Item];

    /// A new state equal to `self` except for its list.
    #[must_use]
    fn with_items(&self, items: Vec<Item>) -> Self;
}

/// Default application state: the item list plus arbitrary extra fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub list: Vec<Item>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AppState {
    pub fn new(list: Vec<Item>) -> Self {
        Self {
            list,
            extra: Map::new(),
        }
    }

    /// Parse a state from JSON.
    ///
    /// Titles that still carry a rendered selection suffix (older data kept
    /// the count inside the title) are split back into title and
    /// `selection_count`.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut state: Self = serde_json::from_str(json)?;
        state.list = state.list.into_iter().map(normalize_legacy_title).collect();
        Ok(state)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn normalize_legacy_title(item: Item) -> Item {
    match labels::split_selection_suffix(&item.title) {
        (base, Some(count)) => Item {
            title: base.to_string(),
            selection_count: if item.selection_count == 0 {
                count
            } else {
                item.selection_count
            },
            ..item
        },
        (_, None) => item,
    }
}

impl ListState for AppState {
    fn items(&self) -> &[Item] {
        &self.list
    }

    fn with_items(&self, items: Vec<Item>) -> Self {
        Self {
            list: items,
            extra: self.extra.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_items_keeps_extra_fields() {
        let state = AppState::from_json(r#"{"list": [], "filter": "all"}"#).unwrap();
        let next = state.with_items(vec![Item::new(1, "one")]);

        assert_eq!(next.list.len(), 1);
        assert_eq!(next.extra.get("filter"), Some(&Value::from("all")));
    }

    #[test]
    fn legacy_titles_are_split() {
        let json = r#"{"list": [
            {"code": 1, "title": "Milk | Selected 3 times", "selected": true},
            {"code": 2, "title": "Хлеб | Выделяли 2 раз"},
            {"code": 3, "title": "Plain"}
        ]}"#;
        let state = AppState::from_json(json).unwrap();

        assert_eq!(state.list[0].title, "Milk");
        assert_eq!(state.list[0].selection_count, 3);
        assert!(state.list[0].selected);
        assert_eq!(state.list[1].title, "Хлеб");
        assert_eq!(state.list[1].selection_count, 2);
        assert_eq!(state.list[2], Item::new(3, "Plain"));
    }

    #[test]
    fn json_round_trip_preserves_extra() {
        let state = AppState::from_json(r#"{"list": [{"code": 1, "title": "a"}], "page": 2}"#)
            .unwrap();
        let back = AppState::from_json(&state.to_json().unwrap()).unwrap();
        assert_eq!(state, back);
    }
}
