//! The policy a query is validated against.

use std::collections::BTreeSet;

use enum_iterator::Sequence;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use odata_models::{BinaryOperator, Function, QueryOption, UnaryOperator};

/// The operators a policy can allow.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Sequence,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    And,
    Or,
    Not,
    Has,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl Operator {
    /// Both unary operators are governed by [`Operator::Not`].
    pub fn from_unary(operator: UnaryOperator) -> Operator {
        match operator {
            UnaryOperator::Not | UnaryOperator::Negate => Operator::Not,
        }
    }

    pub fn from_binary(operator: BinaryOperator) -> Operator {
        match operator {
            BinaryOperator::And => Operator::And,
            BinaryOperator::Or => Operator::Or,
            BinaryOperator::Equal => Operator::Equal,
            BinaryOperator::NotEqual => Operator::NotEqual,
            BinaryOperator::GreaterThan => Operator::GreaterThan,
            BinaryOperator::GreaterThanOrEqual => Operator::GreaterThanOrEqual,
            BinaryOperator::LessThan => Operator::LessThan,
            BinaryOperator::LessThanOrEqual => Operator::LessThanOrEqual,
            BinaryOperator::Has => Operator::Has,
            BinaryOperator::Add => Operator::Add,
            BinaryOperator::Subtract => Operator::Subtract,
            BinaryOperator::Multiply => Operator::Multiply,
            BinaryOperator::Divide => Operator::Divide,
            BinaryOperator::Modulo => Operator::Modulo,
        }
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Operator::Add
                | Operator::Subtract
                | Operator::Multiply
                | Operator::Divide
                | Operator::Modulo
        )
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Operator::Equal => "eq",
            Operator::NotEqual => "ne",
            Operator::GreaterThan => "gt",
            Operator::GreaterThanOrEqual => "ge",
            Operator::LessThan => "lt",
            Operator::LessThanOrEqual => "le",
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Not => "not",
            Operator::Has => "has",
            Operator::Add => "add",
            Operator::Subtract => "sub",
            Operator::Multiply => "mul",
            Operator::Divide => "div",
            Operator::Modulo => "mod",
        };
        write!(f, "{name}")
    }
}

/// What queries may contain. Missing fields allow everything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSettings {
    #[serde(default = "all::<QueryOption>")]
    pub allowed_options: BTreeSet<QueryOption>,
    #[serde(default = "all::<Operator>")]
    pub allowed_operators: BTreeSet<Operator>,
    #[serde(default = "all::<Function>")]
    pub allowed_functions: BTreeSet<Function>,
    /// The largest `$skip` accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_skip: Option<u64>,
    /// The largest `$top` accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_top: Option<u64>,
}

fn all<T: Sequence + Ord>() -> BTreeSet<T> {
    enum_iterator::all::<T>().collect()
}

impl Default for ValidationSettings {
    fn default() -> Self {
        ValidationSettings {
            allowed_options: all(),
            allowed_operators: all(),
            allowed_functions: all(),
            max_skip: None,
            max_top: None,
        }
    }
}

impl ValidationSettings {
    pub fn allows_operator(&self, operator: Operator) -> bool {
        self.allowed_operators.contains(&operator)
    }

    pub fn allows_function(&self, function: Function) -> bool {
        self.allowed_functions.contains(&function)
    }
}
