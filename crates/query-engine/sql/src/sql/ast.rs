//! Type definitions of a SQL AST representation.

/// A SELECT command, spliced together from a caller supplied skeleton and generated clauses.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub top: Top,
    pub select_list: SelectList,
    pub from: RawSql,
    pub where_: Where,
    pub order_by: OrderBy,
    pub paging: Paging,
}

/// A TOP clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Top {
    Empty,
    /// Caller supplied text, e.g. `TOP(40)`, kept as is.
    Verbatim(String),
    Rows(u64),
}

/// A select list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectList {
    /// Caller supplied column list, kept as is.
    Verbatim(String),
    SelectStar,
    Columns(Vec<ColumnName>),
    Count(ColumnName),
}

/// Raw SQL written by a user which is opaque to us, e.g. `FROM [Customers] WHERE [Active] = 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSql(pub String);

/// The keyword introducing a generated predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateKeyword {
    Where,
    /// The skeleton already has a WHERE clause, so the predicate extends it.
    And,
}

/// A WHERE clause
#[derive(Debug, Clone, PartialEq)]
pub struct Where {
    pub keyword: PredicateKeyword,
    pub predicate: Option<Expression>,
}

/// An ORDER BY clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub elements: Vec<OrderByElement>,
}

/// A single element in an ORDER BY clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByElement {
    pub target: ColumnName,
    pub direction: OrderByDirection,
}

/// A direction for a single ORDER BY element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderByDirection {
    Asc,
    Desc,
}

/// OFFSET and FETCH clauses. FETCH is only meaningful after an OFFSET.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Paging {
    pub offset: Option<u64>,
    pub fetch: Option<u64>,
}

/// A scalar expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A column, already quoted
    ColumnName(ColumnName),
    /// An irreducible value
    Value(Value),
    /// A binary operation on two scalar expressions, always parenthesized
    BinaryOperation {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
    },
    /// NOT clause
    Not(Box<Expression>),
    /// A LIKE match of an expression against a bound value
    Like {
        expression: Box<Expression>,
        pattern: LikePattern,
        value: Box<Expression>,
    },
    /// An expression in parentheses
    Nested(Box<Expression>),
    /// A scalar function call
    FunctionCall {
        function: Function,
        args: Vec<Expression>,
    },
    /// The date part argument of DATEPART and DATEDIFF
    DatePart(DatePart),
    Cast {
        expression: Box<Expression>,
        r#type: ScalarType,
    },
}

/// Where the wildcards go in a LIKE pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikePattern {
    Contains,
    StartsWith,
    EndsWith,
}

/// A binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    And,
    Or,
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
    Is,
    IsNot,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

/// A scalar function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    CharIndex,
    LTrim,
    RTrim,
    DatePart,
    DateDiff,
    Len,
    Lower,
    Upper,
    GetUtcDate,
    Substring,
    Concat,
    Year,
    Month,
    Day,
    Round,
    Floor,
    Ceiling,
}

/// Date parts accepted by DATEPART and DATEDIFF
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    Hour,
    Minute,
    Second,
    TzOffset,
}

/// Types a value can be cast to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Date,
    Time,
}

/// A value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    /// An integer literal written inline
    Int4(i32),
    /// A value bound to a placeholder
    Parameter(serde_json::Value),
}

/// A column name, already quoted by the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnName(pub String);
