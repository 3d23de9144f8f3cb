//! Translate the `$select` option into a select list, and `$top` into a TOP clause.

use odata_models::{Projection, SelectItem};
use query_engine_sql::sql;

use crate::translation::error::Error;
use crate::translation::helpers::Env;

/// Translate the projection. Without one, or when it selects everything, this is `*`.
pub fn translate(env: &Env) -> Result<sql::ast::SelectList, Error> {
    let items = match &env.query.select {
        Some(projection @ Projection::Items(items)) if !projection.is_all_selected() => items,
        _ => return Ok(sql::ast::SelectList::SelectStar),
    };

    let columns = items
        .iter()
        .map(|item| match item {
            SelectItem::Property { property } => env.lookup_column(property),
            SelectItem::Expand { navigation } => Err(Error::UnsupportedNode(format!(
                "the expanded navigation property '{navigation}'"
            ))),
            // A wildcard anywhere selects everything, handled above.
            SelectItem::Wildcard => Err(Error::UnsupportedNode("a wildcard".to_string())),
        })
        .collect::<Result<Vec<_>, Error>>()?;
    Ok(sql::ast::SelectList::Columns(columns))
}

/// `TOP(n)` when rows are limited without being skipped. Skipped rows are paged instead.
pub fn translate_top(env: &Env) -> sql::ast::Top {
    match (env.query.top, env.query.skip) {
        (Some(top), None) => sql::ast::Top::Rows(top),
        _ => sql::ast::Top::Empty,
    }
}

#[cfg(test)]
mod tests {
    use odata_models::ParsedQuery;
    use query_engine_metadata::metadata::Resolvers;
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn columns_in_the_order_selected() {
        let mut query = ParsedQuery::new("Customer");
        query.select = Some(Projection::from_items(vec![
            SelectItem::property("Name"),
            SelectItem::property("Id"),
        ]));
        let resolvers = Resolvers::default();

        assert_eq!(
            translate(&Env::new(&query, &resolvers)),
            Ok(sql::ast::SelectList::Columns(vec![
                sql::ast::ColumnName("[Name]".to_string()),
                sql::ast::ColumnName("[Id]".to_string()),
            ]))
        );
    }

    #[test]
    fn wildcard_selects_everything() {
        let mut query = ParsedQuery::new("Customer");
        query.select = Some(Projection::Items(vec![
            SelectItem::Wildcard,
            SelectItem::property("Id"),
        ]));
        let resolvers = Resolvers::default();

        assert_eq!(
            translate(&Env::new(&query, &resolvers)),
            Ok(sql::ast::SelectList::SelectStar)
        );
    }

    #[test]
    fn wildcard_after_properties_selects_everything() {
        let mut query = ParsedQuery::new("Customer");
        query.select = Some(Projection::Items(vec![
            SelectItem::property("Name"),
            SelectItem::Wildcard,
        ]));
        let resolvers = Resolvers::default();

        assert_eq!(
            translate(&Env::new(&query, &resolvers)),
            Ok(sql::ast::SelectList::SelectStar)
        );
    }

    #[test]
    fn top_only_without_skip() {
        let resolvers = Resolvers::default();
        let mut query = ParsedQuery::new("Customer");
        query.top = Some(20);
        assert_eq!(
            translate_top(&Env::new(&query, &resolvers)),
            sql::ast::Top::Rows(20)
        );

        query.skip = Some(40);
        assert_eq!(
            translate_top(&Env::new(&query, &resolvers)),
            sql::ast::Top::Empty
        );
    }
}
