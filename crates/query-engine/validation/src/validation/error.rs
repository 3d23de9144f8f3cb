//! Errors for query validation.

use odata_models::QueryOption;
use thiserror::Error;

use super::settings::Operator;

/// A policy violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("The '{0}' query option is not allowed.")]
    OptionNotAllowed(QueryOption),
    #[error("The '{0}' {kind} operator is not allowed.", kind = operator_kind(*.0))]
    OperatorNotAllowed(Operator),
    #[error("The '{0}' function is not allowed.")]
    FunctionNotAllowed(String),
    #[error("The $skip query option exceeded the maximum of {max}: {skip}.")]
    SkipExceeded { skip: u64, max: u64 },
    #[error("The $top query option exceeded the maximum of {max}: {top}.")]
    TopExceeded { top: u64, max: u64 },
}

fn operator_kind(operator: Operator) -> &'static str {
    if operator.is_arithmetic() {
        "arithmetic"
    } else {
        "logical"
    }
}
