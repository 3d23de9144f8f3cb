//! Translate `$skip` and `$top` into OFFSET and FETCH clauses.

use query_engine_sql::sql;

use crate::translation::helpers::Env;

/// OFFSET needs an explicit ordering, so nothing is paged without one. Without a skip the
/// rows are limited by a TOP clause instead.
pub fn translate(env: &Env) -> sql::ast::Paging {
    let is_ordered = env
        .query
        .order_by
        .as_ref()
        .is_some_and(|order_by| !order_by.elements.is_empty());

    match env.query.skip {
        Some(skip) if is_ordered => sql::ast::Paging {
            offset: Some(skip),
            fetch: env.query.top,
        },
        _ => sql::helpers::empty_paging(),
    }
}
