//! Walk a `$filter` tree and check every operator and function against the policy.

use odata_models::{Expression, Function};

use super::error::Error;
use super::settings::{Operator, ValidationSettings};

/// A node is checked before its children, and the children of a rejected node are never
/// visited.
pub fn validate(expression: &Expression, settings: &ValidationSettings) -> Result<(), Error> {
    match expression {
        Expression::Constant { .. } | Expression::Property { .. } => Ok(()),
        Expression::Cast { expression } => validate(expression, settings),
        Expression::BinaryOperation {
            operator,
            left,
            right,
        } => {
            check_operator(Operator::from_binary(*operator), settings)?;
            validate(left, settings)?;
            validate(right, settings)
        }
        Expression::UnaryOperation { operator, operand } => {
            check_operator(Operator::from_unary(*operator), settings)?;
            validate(operand, settings)
        }
        Expression::FunctionCall { name, arguments } => {
            check_function(Function::from_name(name), name, settings)?;
            arguments
                .iter()
                .try_for_each(|argument| validate(argument, settings))
        }
        Expression::Lambda {
            quantifier,
            predicate,
            ..
        } => {
            let name = quantifier.function_name();
            check_function(Function::from_name(name), name, settings)?;
            match predicate {
                Some(predicate) => validate(predicate, settings),
                None => Ok(()),
            }
        }
    }
}

fn check_operator(operator: Operator, settings: &ValidationSettings) -> Result<(), Error> {
    if settings.allows_operator(operator) {
        Ok(())
    } else {
        Err(Error::OperatorNotAllowed(operator))
    }
}

/// Functions outside the known set are never allowed.
fn check_function(
    function: Option<Function>,
    name: &str,
    settings: &ValidationSettings,
) -> Result<(), Error> {
    match function {
        Some(function) if settings.allows_function(function) => Ok(()),
        _ => Err(Error::FunctionNotAllowed(name.to_string())),
    }
}
