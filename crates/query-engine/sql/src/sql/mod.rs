//! SQL AST types and the low-level string representation of a SQL command.

pub mod ast;
pub mod convert;
pub mod helpers;
pub mod string;
