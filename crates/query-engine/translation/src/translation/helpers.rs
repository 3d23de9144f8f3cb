//! Helpers for processing the parsed query and building SQL.

use odata_models::{ParsedQuery, PropertyRef};
use query_engine_metadata::metadata::Resolvers;
use query_engine_sql::sql;

use super::error::Error;

/// Static information from the query and the resolvers.
#[derive(Debug, Clone, Copy)]
pub struct Env<'a> {
    pub query: &'a ParsedQuery,
    resolvers: &'a Resolvers,
}

impl<'a> Env<'a> {
    /// Create a new Env by supplying the query and the resolvers.
    pub fn new(query: &'a ParsedQuery, resolvers: &'a Resolvers) -> Env<'a> {
        Env { query, resolvers }
    }

    /// Look up the column of a property of the root entity.
    pub fn lookup_column(&self, property: &PropertyRef) -> Result<sql::ast::ColumnName, Error> {
        if !property.is_root() {
            return Err(Error::UnsupportedNode(format!(
                "the navigation property '{property}'"
            )));
        }
        self.resolvers
            .resolve_column(property)
            .map(sql::ast::ColumnName)
            .ok_or_else(|| Error::InvalidColumn(property.to_string()))
    }

    /// The key column of the queried entity type.
    pub fn key_column(&self) -> sql::ast::ColumnName {
        sql::ast::ColumnName(self.resolvers.resolve_key(&self.query.entity_type))
    }
}
