//! Convert a SQL AST to a low-level SQL string.

use super::ast::*;
use super::string::*;

// Convert to SQL strings

impl Select {
    /// Render the command. Empty clauses are skipped, the others are separated by one space.
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax("SELECT");

        if !self.top.is_empty() {
            sql.append_syntax(" ");
            self.top.to_sql(sql);
        }

        if !self.select_list.is_empty() {
            sql.append_syntax(" ");
            self.select_list.to_sql(sql);
        }

        self.from.to_sql(sql);

        if !self.where_.is_empty() {
            sql.append_syntax(" ");
            self.where_.to_sql(sql);
        }

        if !self.order_by.is_empty() {
            sql.append_syntax(" ");
            self.order_by.to_sql(sql);
        }

        if !self.paging.is_empty() {
            sql.append_syntax(" ");
            self.paging.to_sql(sql);
        }
    }
}

impl Top {
    pub fn is_empty(&self) -> bool {
        match self {
            Top::Empty => true,
            Top::Verbatim(text) => text.is_empty(),
            Top::Rows(_) => false,
        }
    }

    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            Top::Empty => {}
            Top::Verbatim(text) => sql.append_syntax(text),
            Top::Rows(rows) => sql.append_syntax(format!("TOP({rows})").as_str()),
        }
    }
}

impl SelectList {
    pub fn is_empty(&self) -> bool {
        match self {
            SelectList::Verbatim(text) => text.is_empty(),
            SelectList::Columns(columns) => columns.is_empty(),
            SelectList::SelectStar | SelectList::Count(_) => false,
        }
    }

    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            SelectList::Verbatim(text) => sql.append_syntax(text),
            SelectList::SelectStar => sql.append_syntax("*"),
            SelectList::Columns(columns) => {
                for (index, column) in columns.iter().enumerate() {
                    column.to_sql(sql);
                    if index < (columns.len() - 1) {
                        sql.append_syntax(", ")
                    }
                }
            }
            SelectList::Count(column) => {
                sql.append_syntax("COUNT(");
                column.to_sql(sql);
                sql.append_syntax(")");
            }
        }
    }
}

impl RawSql {
    /// Raw text is appended after a space, unless there is none.
    pub fn to_sql(&self, sql: &mut SQL) {
        let RawSql(text) = self;
        sql.append_with_space(text);
    }
}

impl PredicateKeyword {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            PredicateKeyword::Where => sql.append_syntax("WHERE "),
            PredicateKeyword::And => sql.append_syntax("AND "),
        }
    }
}

impl Where {
    pub fn is_empty(&self) -> bool {
        self.predicate.is_none()
    }

    pub fn to_sql(&self, sql: &mut SQL) {
        if let Some(predicate) = &self.predicate {
            self.keyword.to_sql(sql);
            predicate.to_sql(sql);
        }
    }
}

impl OrderBy {
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn to_sql(&self, sql: &mut SQL) {
        if !self.elements.is_empty() {
            sql.append_syntax("ORDER BY ");
            for (index, order_by_item) in self.elements.iter().enumerate() {
                order_by_item.to_sql(sql);
                if index < (self.elements.len() - 1) {
                    sql.append_syntax(", ")
                }
            }
        }
    }
}

impl OrderByElement {
    pub fn to_sql(&self, sql: &mut SQL) {
        self.target.to_sql(sql);
        self.direction.to_sql(sql);
    }
}

impl OrderByDirection {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            OrderByDirection::Asc => {}
            OrderByDirection::Desc => sql.append_syntax(" DESC"),
        }
    }
}

impl Paging {
    pub fn is_empty(&self) -> bool {
        self.offset.is_none()
    }

    pub fn to_sql(&self, sql: &mut SQL) {
        if let Some(offset) = self.offset {
            sql.append_syntax(format!("OFFSET {offset} ROWS").as_str());
            if let Some(fetch) = self.fetch {
                sql.append_syntax(format!(" FETCH NEXT {fetch} ROWS ONLY").as_str());
            }
        }
    }
}

// scalars
impl Expression {
    pub fn to_sql(&self, sql: &mut SQL) {
        match &self {
            Expression::ColumnName(column_name) => column_name.to_sql(sql),
            Expression::Value(value) => value.to_sql(sql),
            Expression::BinaryOperation {
                left,
                operator,
                right,
            } => {
                sql.append_syntax("(");
                left.to_sql(sql);
                operator.to_sql(sql);
                right.to_sql(sql);
                sql.append_syntax(")");
            }
            Expression::Not(expr) => {
                sql.append_syntax("NOT ");
                expr.to_sql(sql);
            }
            Expression::Like {
                expression,
                pattern,
                value,
            } => {
                expression.to_sql(sql);
                sql.append_syntax(" LIKE (");
                match pattern {
                    LikePattern::Contains => {
                        sql.append_syntax("'%' + ");
                        value.to_sql(sql);
                        sql.append_syntax(" + '%'");
                    }
                    LikePattern::EndsWith => {
                        sql.append_syntax("'%' + ");
                        value.to_sql(sql);
                    }
                    LikePattern::StartsWith => {
                        value.to_sql(sql);
                        sql.append_syntax(" + '%'");
                    }
                }
                sql.append_syntax(")");
            }
            Expression::Nested(expr) => {
                sql.append_syntax("(");
                expr.to_sql(sql);
                sql.append_syntax(")");
            }
            Expression::FunctionCall { function, args } => {
                function.to_sql(sql);
                sql.append_syntax("(");
                for (index, arg) in args.iter().enumerate() {
                    arg.to_sql(sql);
                    if index < (args.len() - 1) {
                        sql.append_syntax(", ")
                    }
                }
                sql.append_syntax(")");
            }
            Expression::DatePart(part) => part.to_sql(sql),
            Expression::Cast { expression, r#type } => {
                sql.append_syntax("CAST(");
                expression.to_sql(sql);
                sql.append_syntax(" AS ");
                r#type.to_sql(sql);
                sql.append_syntax(")");
            }
        }
    }
}

impl BinaryOperator {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax(match self {
            BinaryOperator::And => " AND ",
            BinaryOperator::Or => " OR ",
            BinaryOperator::Equals => " = ",
            BinaryOperator::NotEquals => " <> ",
            BinaryOperator::GreaterThan => " > ",
            BinaryOperator::GreaterThanOrEqualTo => " >= ",
            BinaryOperator::LessThan => " < ",
            BinaryOperator::LessThanOrEqualTo => " <= ",
            BinaryOperator::Is => " IS ",
            BinaryOperator::IsNot => " IS NOT ",
            BinaryOperator::Add => " + ",
            BinaryOperator::Subtract => " - ",
            BinaryOperator::Multiply => " * ",
            BinaryOperator::Divide => " / ",
            BinaryOperator::Modulo => " % ",
        })
    }
}

impl Function {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax(match self {
            Function::CharIndex => "CHARINDEX",
            Function::LTrim => "LTRIM",
            Function::RTrim => "RTRIM",
            Function::DatePart => "DATEPART",
            Function::DateDiff => "DATEDIFF",
            Function::Len => "LEN",
            Function::Lower => "LOWER",
            Function::Upper => "UPPER",
            Function::GetUtcDate => "GETUTCDATE",
            Function::Substring => "SUBSTRING",
            Function::Concat => "CONCAT",
            Function::Year => "YEAR",
            Function::Month => "MONTH",
            Function::Day => "DAY",
            Function::Round => "ROUND",
            Function::Floor => "FLOOR",
            Function::Ceiling => "CEILING",
        })
    }
}

impl DatePart {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax(match self {
            DatePart::Hour => "hour",
            DatePart::Minute => "minute",
            DatePart::Second => "second",
            DatePart::TzOffset => "TZoffset",
        })
    }
}

impl ScalarType {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax(match self {
            ScalarType::Date => "DATE",
            ScalarType::Time => "TIME",
        })
    }
}

impl Value {
    pub fn to_sql(&self, sql: &mut SQL) {
        match &self {
            Value::Null => sql.append_syntax("NULL"),
            Value::Int4(i) => sql.append_syntax(format!("{i}").as_str()),
            Value::Parameter(value) => sql.append_param(value.clone()),
        }
    }
}

impl ColumnName {
    pub fn to_sql(&self, sql: &mut SQL) {
        let ColumnName(name) = self;
        sql.append_syntax(name);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use similar_asserts::assert_eq;

    use super::*;
    use crate::sql::helpers;

    fn column(name: &str) -> Expression {
        helpers::column(ColumnName(name.to_string()))
    }

    fn render(expression: &Expression) -> SQL {
        let mut sql = SQL::new();
        expression.to_sql(&mut sql);
        sql
    }

    #[test]
    fn null_comparisons_bind_nothing() {
        let expression = Expression::BinaryOperation {
            left: Box::new(column("[Name]")),
            operator: BinaryOperator::IsNot,
            right: Box::new(Expression::Value(Value::Null)),
        };
        let sql = render(&expression);
        assert_eq!(sql.sql, "([Name] IS NOT NULL)");
        assert!(sql.params.is_empty());
    }

    #[test]
    fn like_patterns() {
        let like = |pattern| Expression::Like {
            expression: Box::new(column("[Name]")),
            pattern,
            value: Box::new(helpers::parameter(json!("a"))),
        };
        assert_eq!(
            render(&like(LikePattern::Contains)).sql,
            "[Name] LIKE ('%' + @p0 + '%')"
        );
        assert_eq!(
            render(&like(LikePattern::EndsWith)).sql,
            "[Name] LIKE ('%' + @p0)"
        );
        assert_eq!(
            render(&like(LikePattern::StartsWith)).sql,
            "[Name] LIKE (@p0 + '%')"
        );
    }

    #[test]
    fn function_calls() {
        let datediff = Expression::FunctionCall {
            function: Function::DateDiff,
            args: vec![
                Expression::DatePart(DatePart::Second),
                Expression::Value(Value::Int4(0)),
                column("[Duration]"),
            ],
        };
        assert_eq!(render(&datediff).sql, "DATEDIFF(second, 0, [Duration])");

        let cast = Expression::Cast {
            expression: Box::new(column("[Created]")),
            r#type: ScalarType::Date,
        };
        assert_eq!(render(&cast).sql, "CAST([Created] AS DATE)");

        let now = Expression::FunctionCall {
            function: Function::GetUtcDate,
            args: vec![],
        };
        assert_eq!(render(&now).sql, "GETUTCDATE()");
    }

    #[test]
    fn select_skips_empty_clauses() {
        let select = Select {
            top: Top::Empty,
            select_list: SelectList::Count(ColumnName("[Id]".to_string())),
            from: RawSql("FROM".to_string()),
            where_: helpers::empty_where(PredicateKeyword::Where),
            order_by: OrderBy { elements: vec![] },
            paging: Paging::default(),
        };
        assert_eq!(
            helpers::select_to_sql(&select, vec![]).sql,
            "SELECT COUNT([Id]) FROM"
        );
    }

    #[test]
    fn select_with_every_clause() {
        let select = Select {
            top: Top::Rows(5),
            select_list: SelectList::Columns(vec![
                ColumnName("[Id]".to_string()),
                ColumnName("[Name]".to_string()),
            ]),
            from: RawSql("FROM [Customers] WHERE [Active] = 1".to_string()),
            where_: Where {
                keyword: PredicateKeyword::And,
                predicate: Some(Expression::BinaryOperation {
                    left: Box::new(column("[Id]")),
                    operator: BinaryOperator::GreaterThan,
                    right: Box::new(helpers::parameter(json!(10))),
                }),
            },
            order_by: OrderBy {
                elements: vec![
                    OrderByElement {
                        target: ColumnName("[Name]".to_string()),
                        direction: OrderByDirection::Desc,
                    },
                    OrderByElement {
                        target: ColumnName("[Id]".to_string()),
                        direction: OrderByDirection::Asc,
                    },
                ],
            },
            paging: Paging {
                offset: Some(10),
                fetch: Some(5),
            },
        };
        let sql = helpers::select_to_sql(&select, vec![]);
        assert_eq!(
            sql.sql,
            "SELECT TOP(5) [Id], [Name] FROM [Customers] WHERE [Active] = 1 AND ([Id] > @p0) ORDER BY [Name] DESC, [Id] OFFSET 10 ROWS FETCH NEXT 5 ROWS ONLY"
        );
        assert_eq!(sql.params, vec![json!(10)]);
    }
}
