use serde::{Deserialize, Serialize};

/// Integer identifier of a list item.
pub type Code = i64;

/// A single entry of the list.
///
/// Items are replaced, never mutated, by store operations: every derived
/// item is built with the `with_*` helpers below.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub code: Code,
    pub title: String,
    #[serde(default)]
    pub selected: bool,
    /// How many times this item has been toggled through `select_item`.
    #[serde(default)]
    pub selection_count: u32,
}

impl Item {
    pub fn new(code: Code, title: impl Into<String>) -> Self {
        Self {
            code,
            title: title.into(),
            selected: false,
            selection_count: 0,
        }
    }

    /// Copy of this item with `selected` set to `selected`.
    #[must_use]
    pub fn with_selected(&self, selected: bool) -> Self {
        Self {
            selected,
            ..self.clone()
        }
    }

    /// Copy of this item with its selection flipped and the count replaced.
    #[must_use]
    pub fn toggled(&self, selection_count: u32) -> Self {
        Self {
            selected: !self.selected,
            selection_count,
            ..self.clone()
        }
    }
}

/// Highest code in `items`, found by scanning the whole slice.
///
/// List order carries no meaning here; the maximum may sit anywhere.
pub fn max_code(items: &[Item]) -> Option<Code> {
    items.iter().map(|item| item.code).max()
}
