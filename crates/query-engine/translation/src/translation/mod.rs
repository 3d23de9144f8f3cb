//! Translate a parsed OData query into a parameterized SQL command.

pub mod error;
pub mod helpers;
pub mod query;
