//! The `$filter` expression tree.

use serde::{Deserialize, Serialize};

/// A reference to a property of an entity.
///
/// An empty `path` means the property belongs to the root entity. Otherwise `path` lists the
/// navigation properties walked before reaching `name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
}

impl PropertyRef {
    pub fn new(name: impl Into<String>) -> Self {
        PropertyRef {
            name: name.into(),
            path: vec![],
        }
    }

    /// A property reached through navigation properties.
    pub fn nested(path: Vec<String>, name: impl Into<String>) -> Self {
        PropertyRef {
            name: name.into(),
            path,
        }
    }

    /// Whether the property belongs directly to the root entity.
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }
}

impl std::fmt::Display for PropertyRef {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for segment in &self.path {
            write!(f, "{segment}/")?;
        }
        write!(f, "{}", self.name)
    }
}

/// A binary operator of the filter language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOperator {
    And,
    Or,
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Has,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

/// A unary operator of the filter language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOperator {
    Not,
    Negate,
}

/// The quantifier of a lambda expression over a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantifier {
    Any,
    All,
}

impl Quantifier {
    /// The name under which the quantifier is allowed or disallowed as a function.
    pub fn function_name(self) -> &'static str {
        match self {
            Quantifier::Any => "any",
            Quantifier::All => "all",
        }
    }
}

/// A node of a `$filter` expression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expression {
    /// A literal value. `null` is the null literal.
    Constant { value: serde_json::Value },
    /// Access to a single-valued property.
    Property { property: PropertyRef },
    BinaryOperation {
        operator: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    UnaryOperation {
        operator: UnaryOperator,
        operand: Box<Expression>,
    },
    /// A call to a built-in function such as `tolower` or `contains`.
    FunctionCall {
        name: String,
        #[serde(default)]
        arguments: Vec<Expression>,
    },
    /// A type conversion inserted by the parser. It has no effect on the emitted SQL.
    Cast { expression: Box<Expression> },
    /// `any` / `all` over a collection property.
    Lambda {
        quantifier: Quantifier,
        collection: PropertyRef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        predicate: Option<Box<Expression>>,
    },
}

// Constructors, mostly for building trees by hand.
impl Expression {
    pub fn constant(value: impl Into<serde_json::Value>) -> Self {
        Expression::Constant {
            value: value.into(),
        }
    }

    pub fn null() -> Self {
        Expression::Constant {
            value: serde_json::Value::Null,
        }
    }

    pub fn property(name: impl Into<String>) -> Self {
        Expression::Property {
            property: PropertyRef::new(name),
        }
    }

    pub fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Self {
        Expression::BinaryOperation {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn and(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOperator::And, left, right)
    }

    pub fn or(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOperator::Or, left, right)
    }

    pub fn equal(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOperator::Equal, left, right)
    }

    pub fn not_equal(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOperator::NotEqual, left, right)
    }

    pub fn not(operand: Expression) -> Self {
        Expression::UnaryOperation {
            operator: UnaryOperator::Not,
            operand: Box::new(operand),
        }
    }

    pub fn function(name: impl Into<String>, arguments: Vec<Expression>) -> Self {
        Expression::FunctionCall {
            name: name.into(),
            arguments,
        }
    }

    pub fn cast(expression: Expression) -> Self {
        Expression::Cast {
            expression: Box::new(expression),
        }
    }

    /// Look through any casts.
    pub fn strip_casts(&self) -> &Expression {
        match self {
            Expression::Cast { expression } => expression.strip_casts(),
            other => other,
        }
    }

    /// Whether this is the null literal, possibly wrapped in casts.
    pub fn is_null_constant(&self) -> bool {
        matches!(
            self.strip_casts(),
            Expression::Constant {
                value: serde_json::Value::Null
            }
        )
    }
}
