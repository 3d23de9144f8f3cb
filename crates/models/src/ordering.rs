//! The `$orderby` option.

use serde::{Deserialize, Serialize};

use crate::expression::Expression;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderDirection {
    #[default]
    Ascending,
    Descending,
}

/// A single `<expression> [asc|desc]` item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderByElement {
    pub expression: Expression,
    #[serde(default)]
    pub direction: OrderDirection,
}

/// The ordering of a query: the first element, then by the next one, and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderBy {
    pub elements: Vec<OrderByElement>,
}

impl OrderBy {
    pub fn new(elements: Vec<OrderByElement>) -> Self {
        OrderBy { elements }
    }

    /// Order by a single property of the root entity.
    pub fn by(name: impl Into<String>, direction: OrderDirection) -> Self {
        OrderBy {
            elements: vec![OrderByElement {
                expression: Expression::property(name),
                direction,
            }],
        }
    }

    /// Append a "then by" property of the root entity.
    #[must_use]
    pub fn then_by(mut self, name: impl Into<String>, direction: OrderDirection) -> Self {
        self.elements.push(OrderByElement {
            expression: Expression::property(name),
            direction,
        });
        self
    }
}
