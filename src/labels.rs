//! Localized display text.
//!
//! The store keeps selection counts as numbers; these helpers turn them into
//! the " | Selected N times" suffix shown next to an item's title.

use serde::{Deserialize, Serialize};

use crate::model::Item;

const SEPARATOR: &str = " | ";

/// Languages the labels are available in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    English,
    Russian,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::English, Locale::Russian];

    fn selection_parts(self) -> (&'static str, &'static str) {
        match self {
            Locale::English => ("Selected ", " times"),
            Locale::Russian => ("Выделяли ", " раз"),
        }
    }
}

/// Title given to items created by `add_item`.
pub fn new_entry_title(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "New entry",
        Locale::Russian => "Новая запись",
    }
}

/// Suffix describing how many times an item was selected.
///
/// ```
/// use itemstore::labels::{selection_suffix, Locale};
///
/// assert_eq!(selection_suffix(Locale::English, 3), " | Selected 3 times");
/// ```
pub fn selection_suffix(locale: Locale, count: u32) -> String {
    let (before, after) = locale.selection_parts();
    format!("{SEPARATOR}{before}{count}{after}")
}

/// Title as displayed: the plain title plus a selection suffix once the
/// item has been selected at least once.
pub fn render_title(item: &Item, locale: Locale) -> String {
    if item.selection_count == 0 {
        item.title.clone()
    } else {
        format!("{}{}", item.title, selection_suffix(locale, item.selection_count))
    }
}

/// Split a title into its base text and a trailing selection count.
///
/// Recognizes the suffix in every supported locale. Text that merely
/// contains the marker word is left alone. Whitespace left in front of the
/// separator by repeated re-selection is dropped from the base.
pub fn split_selection_suffix(title: &str) -> (&str, Option<u32>) {
    let Some(at) = title.rfind(SEPARATOR) else {
        return (title, None);
    };
    let tail = &title[at + SEPARATOR.len()..];

    for locale in Locale::ALL {
        let (before, after) = locale.selection_parts();
        let count = tail
            .strip_prefix(before)
            .and_then(|rest| rest.strip_suffix(after))
            .and_then(|digits| digits.parse::<u32>().ok());
        if let Some(count) = count {
            return (title[..at].trim_end(), Some(count));
        }
    }
    (title, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn russian_suffix() {
        assert_eq!(selection_suffix(Locale::Russian, 5), " | Выделяли 5 раз");
        assert_eq!(new_entry_title(Locale::Russian), "Новая запись");
    }

    #[test]
    fn render_skips_unselected_items() {
        let item = Item::new(1, "Milk");
        assert_eq!(render_title(&item, Locale::English), "Milk");

        let item = item.toggled(2);
        assert_eq!(render_title(&item, Locale::English), "Milk | Selected 2 times");
    }

    #[test]
    fn split_only_matches_full_suffix() {
        assert_eq!(split_selection_suffix("Selected works"), ("Selected works", None));
        assert_eq!(
            split_selection_suffix("a | Selected many times"),
            ("a | Selected many times", None)
        );
        assert_eq!(split_selection_suffix("a | b | Selected 10 times"), ("a | b", Some(10)));
    }

    #[test]
    fn split_trims_padding_before_separator() {
        assert_eq!(split_selection_suffix("Milk  | Выделяли 2 раз"), ("Milk", Some(2)));
        assert_eq!(split_selection_suffix("Milk    | Selected 4 times"), ("Milk", Some(4)));
    }

    #[test]
    fn locale_deserializes_lowercase() {
        let locale: Locale = serde_json::from_str("\"russian\"").unwrap();
        assert_eq!(locale, Locale::Russian);
    }
}
