//! Helpers for building sql::ast types in certain shapes and patterns.

use super::ast::*;
use super::string::SQL;

// Empty clauses //

/// An empty `WHERE` clause that would be introduced by `keyword`.
pub fn empty_where(keyword: PredicateKeyword) -> Where {
    Where {
        keyword,
        predicate: None,
    }
}

/// An empty `ORDER BY` clause.
pub fn empty_order_by() -> OrderBy {
    OrderBy { elements: vec![] }
}

/// Empty `OFFSET` and `FETCH` clauses.
pub fn empty_paging() -> Paging {
    Paging {
        offset: None,
        fetch: None,
    }
}

// Expressions //

/// A column reference.
pub fn column(name: ColumnName) -> Expression {
    Expression::ColumnName(name)
}

/// A value bound to a placeholder.
pub fn parameter(value: serde_json::Value) -> Expression {
    Expression::Value(Value::Parameter(value))
}

/// `left <operator> right`
pub fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Expression {
    Expression::BinaryOperation {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }
}

/// A function call with the given arguments.
pub fn call(function: Function, args: Vec<Expression>) -> Expression {
    Expression::FunctionCall { function, args }
}

// SELECTs //

/// The `SELECT COUNT(<key>) <from> <where>` command.
pub fn count_select(key: ColumnName, from: RawSql, where_: Where) -> Select {
    Select {
        top: Top::Empty,
        select_list: SelectList::Count(key),
        from,
        where_,
        order_by: empty_order_by(),
        paging: empty_paging(),
    }
}

/// Render a select. Its placeholders are numbered after `params`.
pub fn select_to_sql(select: &Select, params: Vec<serde_json::Value>) -> SQL {
    let mut sql = SQL::with_params(params);
    select.to_sql(&mut sql);
    sql
}
