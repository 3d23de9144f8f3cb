//! Compile parsed OData queries into parameterized SQL Server commands.
//!
//! The query is spliced into a caller supplied `SELECT ... FROM ...` command. Values taken
//! from the filter become `@pN` placeholders numbered after the positional arguments the
//! command already uses, so the returned arguments line up with the placeholders.

use odata_models::ParsedQuery;
use query_engine_translation::translation;
use query_engine_validation::validation;

pub use odata_models as models;
pub use query_engine_metadata::metadata::{Metadata, Resolvers};
pub use query_engine_translation::translation::query::{
    CountSqlQuery, SqlQuery, DEFAULT_COMMAND_TEXT,
};
pub use query_engine_validation::validation::{Operator, ValidationSettings};

/// Anything that can go wrong between a parsed query and its SQL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Translation(#[from] translation::error::Error),
    #[error(transparent)]
    Validation(#[from] validation::error::Error),
}

/// The command text and the arguments its placeholders refer to.
pub type Command = (String, Vec<serde_json::Value>);

/// Build the command returning the rows the query asks for.
pub fn build_command_text(
    base_sql: &str,
    positional_arguments: Vec<serde_json::Value>,
    query: &ParsedQuery,
    resolvers: &Resolvers,
) -> Result<Command, Error> {
    let sql = translation::query::translate(base_sql, positional_arguments, query, resolvers)?;
    Ok((sql.sql, sql.params))
}

/// Build the command counting the rows the query matches, when it asks for a count.
pub fn build_count_command_text(
    base_sql: &str,
    positional_arguments: Vec<serde_json::Value>,
    query: &ParsedQuery,
    resolvers: &Resolvers,
) -> Result<Option<Command>, Error> {
    let sql =
        translation::query::translate_count(base_sql, positional_arguments, query, resolvers)?;
    Ok(sql.map(|sql| (sql.sql, sql.params)))
}

/// Check the query against the settings before building any SQL.
pub fn validate(query: &ParsedQuery, settings: &ValidationSettings) -> Result<(), Error> {
    validation::validate(query, settings).map_err(|err| {
        tracing::warn!(entity_type = %query.entity_type, error = %err, "query rejected");
        Error::from(err)
    })
}
