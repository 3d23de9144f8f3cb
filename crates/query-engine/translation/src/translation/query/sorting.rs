//! Translate the `$orderby` option into an ORDER BY clause.

use odata_models::{Expression, OrderDirection};
use query_engine_sql::sql;

use crate::translation::error::Error;
use crate::translation::helpers::Env;

/// Convert the order by fields to an ORDER BY clause. Only properties of the queried entity
/// can be ordered by.
pub fn translate(env: &Env) -> Result<sql::ast::OrderBy, Error> {
    let Some(order_by) = &env.query.order_by else {
        return Ok(sql::helpers::empty_order_by());
    };

    let elements = order_by
        .elements
        .iter()
        .map(|element| {
            let target = match &element.expression {
                Expression::Property { property } => env.lookup_column(property),
                other => Err(Error::UnsupportedNode(format!(
                    "ordering by {}",
                    describe(other)
                ))),
            }?;
            let direction = match element.direction {
                OrderDirection::Ascending => sql::ast::OrderByDirection::Asc,
                OrderDirection::Descending => sql::ast::OrderByDirection::Desc,
            };
            Ok(sql::ast::OrderByElement { target, direction })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(sql::ast::OrderBy { elements })
}

fn describe(expression: &Expression) -> &'static str {
    match expression {
        Expression::Constant { .. } => "a constant",
        Expression::Property { .. } => "a property",
        Expression::BinaryOperation { .. } => "a binary operation",
        Expression::UnaryOperation { .. } => "a unary operation",
        Expression::FunctionCall { .. } => "a function call",
        Expression::Cast { .. } => "a cast",
        Expression::Lambda { .. } => "a lambda operator",
    }
}

#[cfg(test)]
mod tests {
    use odata_models::{OrderBy, OrderByElement, ParsedQuery};
    use query_engine_metadata::metadata::Resolvers;
    use query_engine_sql::sql::string::SQL;
    use similar_asserts::assert_eq;

    use super::*;

    fn render(order_by: OrderBy) -> Result<String, Error> {
        let mut query = ParsedQuery::new("Customer");
        query.order_by = Some(order_by);
        let resolvers = Resolvers::default();

        let mut sql = SQL::new();
        translate(&Env::new(&query, &resolvers))?.to_sql(&mut sql);
        Ok(sql.sql)
    }

    #[test]
    fn then_by_chain() {
        assert_eq!(
            render(
                OrderBy::by("Name", OrderDirection::Descending)
                    .then_by("Id", OrderDirection::Ascending)
            ),
            Ok("ORDER BY [Name] DESC, [Id]".to_string())
        );
    }

    #[test]
    fn only_properties() {
        assert_eq!(
            render(OrderBy::new(vec![OrderByElement {
                expression: Expression::function("tolower", vec![Expression::property("Name")]),
                direction: OrderDirection::Ascending,
            }])),
            Err(Error::UnsupportedNode(
                "ordering by a function call".to_string()
            ))
        );
    }

    #[test]
    fn unresolved_column() {
        let mut query = ParsedQuery::new("Customer");
        query.order_by = Some(OrderBy::by("Name", OrderDirection::Ascending));
        let resolvers = Resolvers::default().with_column_resolver(|_| None);

        assert_eq!(
            translate(&Env::new(&query, &resolvers)),
            Err(Error::InvalidColumn("Name".to_string()))
        );
    }

    #[test]
    fn no_ordering() {
        assert_eq!(render(OrderBy::new(vec![])), Ok(String::new()));
    }
}
