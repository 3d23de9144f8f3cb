//! Errors for query translation.

use thiserror::Error;

/// A type for translation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("The SQL command text '{0}' does not contain any of the supported SELECT clauses.")]
    UnsupportedCommandShape(String),
    #[error("The column name of property '{0}' is invalid.")]
    InvalidColumn(String),
    #[error("Queries containing {0} are not supported.")]
    UnsupportedNode(String),
    #[error("The function '{0}' is not supported.")]
    UnsupportedFunction(String),
    #[error("The function '{function}' requires at least {expected} argument(s).")]
    MissingFunctionArgument { function: String, expected: usize },
}
