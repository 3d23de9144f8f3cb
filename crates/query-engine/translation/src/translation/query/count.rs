//! Translate a query into the command counting every row it matches.

use query_engine_sql::sql;

use super::command::CommandSkeleton;
use super::filtering;
use crate::translation::error::Error;
use crate::translation::helpers::Env;

/// `SELECT COUNT(<key>) FROM ...` with the filter applied. Projection, ordering and paging
/// do not change the number of matching rows and are left out.
pub fn translate(env: &Env, skeleton: &CommandSkeleton) -> Result<sql::ast::Select, Error> {
    let where_ = filtering::translate(env, skeleton.predicate_keyword())?;

    Ok(sql::helpers::count_select(
        env.key_column(),
        sql::ast::RawSql(skeleton.from.to_string()),
        where_,
    ))
}
