//! Structured OData query options, as handed over by a query-option parser.
//!
//! Nothing in here knows about SQL. The types are plain data with serde support so that a
//! parsed query can travel as JSON between the parser and the query engine.

pub mod expression;
pub mod functions;
pub mod options;
pub mod ordering;
pub mod projection;

// re-export without modules
pub use expression::*;
pub use functions::Function;
pub use options::*;
pub use ordering::*;
pub use projection::*;
