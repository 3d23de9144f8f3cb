//! Check a parsed query against a policy before any SQL is built.

pub mod error;
pub mod filter;
pub mod settings;

use odata_models::{ParsedQuery, QueryOption};

use error::Error;
pub use settings::{Operator, ValidationSettings};

/// Validate the query against the settings. The options are checked in a fixed order and the
/// first violation is returned.
pub fn validate(query: &ParsedQuery, settings: &ValidationSettings) -> Result<(), Error> {
    for option in enum_iterator::all::<QueryOption>() {
        if !query.has_option(option) {
            continue;
        }
        if !settings.allowed_options.contains(&option) {
            return Err(Error::OptionNotAllowed(option));
        }

        match option {
            QueryOption::Filter => {
                if let Some(filter) = &query.filter {
                    filter::validate(filter, settings)?;
                }
            }
            QueryOption::Skip => {
                if let (Some(skip), Some(max)) = (query.skip, settings.max_skip) {
                    if skip > max {
                        return Err(Error::SkipExceeded { skip, max });
                    }
                }
            }
            QueryOption::Top => {
                if let (Some(top), Some(max)) = (query.top, settings.max_top) {
                    if top > max {
                        return Err(Error::TopExceeded { top, max });
                    }
                }
            }
            QueryOption::Count
            | QueryOption::DeltaToken
            | QueryOption::Format
            | QueryOption::OrderBy
            | QueryOption::Search
            | QueryOption::Select
            | QueryOption::Expand
            | QueryOption::SkipToken
            | QueryOption::Apply => {}
        }
    }

    tracing::debug!(entity_type = %query.entity_type, "query is valid");
    Ok(())
}
