//! The `$select` option.

use serde::{Deserialize, Serialize};

use crate::expression::PropertyRef;

/// One item of a `$select` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectItem {
    /// `*`
    Wildcard,
    Property { property: PropertyRef },
    /// A navigation property pulled in through `$expand`.
    Expand { navigation: PropertyRef },
}

impl SelectItem {
    pub fn property(name: impl Into<String>) -> Self {
        SelectItem::Property {
            property: PropertyRef::new(name),
        }
    }
}

/// The projection of a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "items", rename_all = "snake_case")]
pub enum Projection {
    /// Every column.
    All,
    Items(Vec<SelectItem>),
}

impl Projection {
    /// Build a projection from a list of items. A wildcard anywhere selects everything.
    pub fn from_items(items: Vec<SelectItem>) -> Self {
        if items.is_empty() || items.contains(&SelectItem::Wildcard) {
            Projection::All
        } else {
            Projection::Items(items)
        }
    }

    /// Whether every column is selected, regardless of how the projection was built.
    pub fn is_all_selected(&self) -> bool {
        match self {
            Projection::All => true,
            Projection::Items(items) => items.is_empty() || items.contains(&SelectItem::Wildcard),
        }
    }
}
