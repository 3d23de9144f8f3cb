//! Handle filtering/where clauses translation.

use odata_models::{BinaryOperator, Expression, Function, UnaryOperator};
use query_engine_sql::sql;
use query_engine_sql::sql::helpers::{binary, call, column, empty_where, parameter};

use crate::translation::error::Error;
use crate::translation::helpers::Env;

/// Translate the `$filter` option into a WHERE clause introduced by `keyword`.
/// Without a filter the clause is empty.
pub fn translate(
    env: &Env,
    keyword: sql::ast::PredicateKeyword,
) -> Result<sql::ast::Where, Error> {
    let Some(filter) = &env.query.filter else {
        return Ok(empty_where(keyword));
    };

    Ok(sql::ast::Where {
        keyword,
        predicate: Some(translate_expression(env, filter)?),
    })
}

/// Translate a filter expression into a SQL expression.
pub fn translate_expression(
    env: &Env,
    expression: &Expression,
) -> Result<sql::ast::Expression, Error> {
    match expression {
        Expression::Cast { expression } => translate_expression(env, expression),
        Expression::Constant {
            value: serde_json::Value::Null,
        } => Ok(sql::ast::Expression::Value(sql::ast::Value::Null)),
        Expression::Constant { value } => Ok(parameter(value.clone())),
        Expression::Property { property } => Ok(column(env.lookup_column(property)?)),
        Expression::BinaryOperation {
            operator,
            left,
            right,
        } => translate_binary_operation(env, *operator, left, right),
        Expression::UnaryOperation {
            operator: UnaryOperator::Not,
            operand,
        } => Ok(sql::ast::Expression::Not(Box::new(translate_expression(
            env, operand,
        )?))),
        Expression::UnaryOperation {
            operator: UnaryOperator::Negate,
            ..
        } => Err(Error::UnsupportedNode("the negation operator".to_string())),
        Expression::FunctionCall { name, arguments } => {
            translate_function_call(env, name, arguments)
        }
        Expression::Lambda { quantifier, .. } => Err(Error::UnsupportedNode(format!(
            "the '{}' lambda operator",
            quantifier.function_name()
        ))),
    }
}

fn translate_binary_operation(
    env: &Env,
    operator: BinaryOperator,
    left: &Expression,
    right: &Expression,
) -> Result<sql::ast::Expression, Error> {
    let left_sql = translate_expression(env, left)?;

    // A LIKE is already a complete predicate: whatever it is compared to is dropped.
    if is_like_call(left) {
        return Ok(sql::ast::Expression::Nested(Box::new(left_sql)));
    }

    if right.is_null_constant() {
        let operator = match operator {
            BinaryOperator::Equal => sql::ast::BinaryOperator::Is,
            BinaryOperator::NotEqual => sql::ast::BinaryOperator::IsNot,
            other => translate_operator(other)?,
        };
        return Ok(binary(
            left_sql,
            operator,
            sql::ast::Expression::Value(sql::ast::Value::Null),
        ));
    }

    let operator = translate_operator(operator)?;
    Ok(binary(left_sql, operator, translate_expression(env, right)?))
}

fn translate_operator(operator: BinaryOperator) -> Result<sql::ast::BinaryOperator, Error> {
    match operator {
        BinaryOperator::And => Ok(sql::ast::BinaryOperator::And),
        BinaryOperator::Or => Ok(sql::ast::BinaryOperator::Or),
        BinaryOperator::Equal => Ok(sql::ast::BinaryOperator::Equals),
        BinaryOperator::NotEqual => Ok(sql::ast::BinaryOperator::NotEquals),
        BinaryOperator::GreaterThan => Ok(sql::ast::BinaryOperator::GreaterThan),
        BinaryOperator::GreaterThanOrEqual => Ok(sql::ast::BinaryOperator::GreaterThanOrEqualTo),
        BinaryOperator::LessThan => Ok(sql::ast::BinaryOperator::LessThan),
        BinaryOperator::LessThanOrEqual => Ok(sql::ast::BinaryOperator::LessThanOrEqualTo),
        BinaryOperator::Add => Ok(sql::ast::BinaryOperator::Add),
        BinaryOperator::Subtract => Ok(sql::ast::BinaryOperator::Subtract),
        BinaryOperator::Multiply => Ok(sql::ast::BinaryOperator::Multiply),
        BinaryOperator::Divide => Ok(sql::ast::BinaryOperator::Divide),
        BinaryOperator::Modulo => Ok(sql::ast::BinaryOperator::Modulo),
        BinaryOperator::Has => Err(Error::UnsupportedNode("the 'has' operator".to_string())),
    }
}

/// Whether the expression is a call to one of the functions translated to LIKE.
fn is_like_call(expression: &Expression) -> bool {
    match expression {
        Expression::FunctionCall { name, .. } => matches!(
            Function::from_name(name),
            Some(Function::Contains | Function::EndsWith | Function::StartsWith)
        ),
        _ => false,
    }
}

fn translate_function_call(
    env: &Env,
    name: &str,
    arguments: &[Expression],
) -> Result<sql::ast::Expression, Error> {
    let function =
        Function::from_name(name).ok_or_else(|| Error::UnsupportedFunction(name.to_string()))?;

    let argument = |index: usize| -> Result<sql::ast::Expression, Error> {
        let argument = arguments
            .get(index)
            .ok_or_else(|| Error::MissingFunctionArgument {
                function: name.to_string(),
                expected: index + 1,
            })?;
        translate_expression(env, argument)
    };
    let all_arguments = || -> Result<Vec<sql::ast::Expression>, Error> {
        arguments
            .iter()
            .map(|argument| translate_expression(env, argument))
            .collect()
    };

    match function {
        Function::Contains => Ok(like(
            argument(0)?,
            sql::ast::LikePattern::Contains,
            argument(1)?,
        )),
        Function::EndsWith => Ok(like(
            argument(0)?,
            sql::ast::LikePattern::EndsWith,
            argument(1)?,
        )),
        Function::StartsWith => Ok(like(
            argument(0)?,
            sql::ast::LikePattern::StartsWith,
            argument(1)?,
        )),
        Function::IndexOf => Ok(call(
            sql::ast::Function::CharIndex,
            vec![argument(1)?, argument(0)?],
        )),
        Function::Trim => Ok(call(
            sql::ast::Function::LTrim,
            vec![call(sql::ast::Function::RTrim, vec![argument(0)?])],
        )),
        Function::Hour => Ok(date_part(sql::ast::DatePart::Hour, argument(0)?)),
        Function::Minute => Ok(date_part(sql::ast::DatePart::Minute, argument(0)?)),
        Function::Second => Ok(date_part(sql::ast::DatePart::Second, argument(0)?)),
        Function::TotalOffsetMinutes => {
            Ok(date_part(sql::ast::DatePart::TzOffset, argument(0)?))
        }
        Function::Date => Ok(cast(argument(0)?, sql::ast::ScalarType::Date)),
        Function::Time => Ok(cast(argument(0)?, sql::ast::ScalarType::Time)),
        Function::TotalSeconds => Ok(call(
            sql::ast::Function::DateDiff,
            vec![
                sql::ast::Expression::DatePart(sql::ast::DatePart::Second),
                sql::ast::Expression::Value(sql::ast::Value::Int4(0)),
                argument(0)?,
            ],
        )),
        Function::Length => Ok(call(sql::ast::Function::Len, all_arguments()?)),
        Function::ToLower => Ok(call(sql::ast::Function::Lower, all_arguments()?)),
        Function::ToUpper => Ok(call(sql::ast::Function::Upper, all_arguments()?)),
        Function::Now => Ok(call(sql::ast::Function::GetUtcDate, all_arguments()?)),
        Function::Substring => Ok(call(sql::ast::Function::Substring, all_arguments()?)),
        Function::Concat => Ok(call(sql::ast::Function::Concat, all_arguments()?)),
        Function::Year => Ok(call(sql::ast::Function::Year, all_arguments()?)),
        Function::Month => Ok(call(sql::ast::Function::Month, all_arguments()?)),
        Function::Day => Ok(call(sql::ast::Function::Day, all_arguments()?)),
        Function::Round => Ok(call(sql::ast::Function::Round, all_arguments()?)),
        Function::Floor => Ok(call(sql::ast::Function::Floor, all_arguments()?)),
        Function::Ceiling => Ok(call(sql::ast::Function::Ceiling, all_arguments()?)),
        Function::FractionalSeconds
        | Function::MaxDateTime
        | Function::MinDateTime
        | Function::IsOf
        | Function::Cast
        | Function::Any
        | Function::All => Err(Error::UnsupportedFunction(name.to_string())),
    }
}

fn like(
    expression: sql::ast::Expression,
    pattern: sql::ast::LikePattern,
    value: sql::ast::Expression,
) -> sql::ast::Expression {
    sql::ast::Expression::Like {
        expression: Box::new(expression),
        pattern,
        value: Box::new(value),
    }
}

fn date_part(
    part: sql::ast::DatePart,
    expression: sql::ast::Expression,
) -> sql::ast::Expression {
    call(
        sql::ast::Function::DatePart,
        vec![sql::ast::Expression::DatePart(part), expression],
    )
}

fn cast(
    expression: sql::ast::Expression,
    r#type: sql::ast::ScalarType,
) -> sql::ast::Expression {
    sql::ast::Expression::Cast {
        expression: Box::new(expression),
        r#type,
    }
}

#[cfg(test)]
mod tests {
    use odata_models::ParsedQuery;
    use query_engine_metadata::metadata::Resolvers;
    use query_engine_sql::sql::string::SQL;
    use serde_json::json;
    use similar_asserts::assert_eq;

    use super::*;

    fn render(filter: Expression) -> Result<SQL, Error> {
        let mut query = ParsedQuery::new("Customer");
        query.filter = Some(filter);
        let resolvers = Resolvers::default();
        let env = Env::new(&query, &resolvers);

        let where_ = translate(&env, sql::ast::PredicateKeyword::Where)?;
        let mut sql = SQL::new();
        where_.to_sql(&mut sql);
        Ok(sql)
    }

    fn text(filter: Expression) -> String {
        render(filter).unwrap().sql
    }

    #[test]
    fn like_functions_drop_the_comparison() {
        let sql = render(Expression::equal(
            Expression::function(
                "contains",
                vec![Expression::property("Name"), Expression::constant("an")],
            ),
            Expression::constant(true),
        ))
        .unwrap();

        assert_eq!(sql.sql, "WHERE ([Name] LIKE ('%' + @p0 + '%'))");
        assert_eq!(sql.params, vec![json!("an")]);
    }

    #[test]
    fn indexof_swaps_its_arguments() {
        let sql = render(Expression::equal(
            Expression::function(
                "indexof",
                vec![Expression::property("Name"), Expression::constant("x")],
            ),
            Expression::constant(1),
        ))
        .unwrap();

        assert_eq!(sql.sql, "WHERE (CHARINDEX(@p0, [Name]) = @p1)");
        assert_eq!(sql.params, vec![json!("x"), json!(1)]);
    }

    #[test]
    fn date_and_time_functions() {
        let on = |name: &str| {
            text(Expression::equal(
                Expression::function(name, vec![Expression::property("Created")]),
                Expression::null(),
            ))
        };

        assert_eq!(on("hour"), "WHERE (DATEPART(hour, [Created]) IS NULL)");
        assert_eq!(on("minute"), "WHERE (DATEPART(minute, [Created]) IS NULL)");
        assert_eq!(on("second"), "WHERE (DATEPART(second, [Created]) IS NULL)");
        assert_eq!(
            on("totaloffsetminutes"),
            "WHERE (DATEPART(TZoffset, [Created]) IS NULL)"
        );
        assert_eq!(
            on("totalseconds"),
            "WHERE (DATEDIFF(second, 0, [Created]) IS NULL)"
        );
        assert_eq!(on("date"), "WHERE (CAST([Created] AS DATE) IS NULL)");
        assert_eq!(on("time"), "WHERE (CAST([Created] AS TIME) IS NULL)");
        assert_eq!(on("year"), "WHERE (YEAR([Created]) IS NULL)");
        assert_eq!(on("trim"), "WHERE (LTRIM(RTRIM([Created])) IS NULL)");
        assert_eq!(on("length"), "WHERE (LEN([Created]) IS NULL)");
    }

    #[test]
    fn functions_keep_all_their_arguments() {
        let sql = render(Expression::equal(
            Expression::function(
                "substring",
                vec![
                    Expression::property("Name"),
                    Expression::constant(1),
                    Expression::constant(2),
                ],
            ),
            Expression::constant("ab"),
        ))
        .unwrap();

        assert_eq!(sql.sql, "WHERE (SUBSTRING([Name], @p0, @p1) = @p2)");
        assert_eq!(sql.params, vec![json!(1), json!(2), json!("ab")]);
        assert_eq!(
            text(Expression::binary(
                BinaryOperator::LessThan,
                Expression::property("Created"),
                Expression::function("now", vec![]),
            )),
            "WHERE ([Created] < GETUTCDATE())"
        );
    }

    #[test]
    fn casts_are_transparent() {
        let sql = render(Expression::not_equal(
            Expression::cast(Expression::property("Age")),
            Expression::cast(Expression::null()),
        ))
        .unwrap();
        assert_eq!(sql.sql, "WHERE ([Age] IS NOT NULL)");
        assert!(sql.params.is_empty());
    }

    #[test]
    fn arithmetic_and_not() {
        assert_eq!(
            text(Expression::not(Expression::binary(
                BinaryOperator::GreaterThan,
                Expression::binary(
                    BinaryOperator::Modulo,
                    Expression::property("Age"),
                    Expression::constant(2),
                ),
                Expression::constant(0),
            ))),
            "WHERE NOT (([Age] % @p0) > @p1)"
        );
    }

    #[test]
    fn untranslatable_nodes() {
        assert_eq!(
            render(Expression::binary(
                BinaryOperator::Has,
                Expression::property("Flags"),
                Expression::constant("A"),
            )),
            Err(Error::UnsupportedNode("the 'has' operator".to_string()))
        );
        assert_eq!(
            render(Expression::UnaryOperation {
                operator: UnaryOperator::Negate,
                operand: Box::new(Expression::property("Age")),
            }),
            Err(Error::UnsupportedNode("the negation operator".to_string()))
        );
        assert_eq!(
            render(Expression::equal(
                Expression::Property {
                    property: odata_models::PropertyRef::nested(vec!["Address".into()], "City"),
                },
                Expression::constant("Prague"),
            )),
            Err(Error::UnsupportedNode(
                "the navigation property 'Address/City'".to_string()
            ))
        );
    }

    #[test]
    fn unsupported_and_incomplete_functions() {
        assert_eq!(
            render(Expression::function("isof", vec![Expression::property("Id")])),
            Err(Error::UnsupportedFunction("isof".to_string()))
        );
        assert_eq!(
            render(Expression::function("soundex", vec![])),
            Err(Error::UnsupportedFunction("soundex".to_string()))
        );
        assert_eq!(
            render(Expression::function(
                "startswith",
                vec![Expression::property("Name")]
            )),
            Err(Error::MissingFunctionArgument {
                function: "startswith".to_string(),
                expected: 2,
            })
        );
    }

    #[test]
    fn unresolved_columns() {
        let mut query = ParsedQuery::new("Customer");
        query.filter = Some(Expression::equal(
            Expression::property("Secret"),
            Expression::constant(1),
        ));
        let resolvers = Resolvers::default().with_column_resolver(|_| None);

        assert_eq!(
            translate(
                &Env::new(&query, &resolvers),
                sql::ast::PredicateKeyword::Where
            ),
            Err(Error::InvalidColumn("Secret".to_string()))
        );
    }
}
