//! Split a caller supplied SELECT command into the parts the generated clauses are spliced into.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::translation::error::Error;
use query_engine_sql::sql;

/// The command used when the caller does not supply one.
pub const DEFAULT_COMMAND_TEXT: &str = "SELECT FROM";

/// `SELECT`, an optional `TOP(n)`, an optional column list and everything from `FROM` onwards.
static SELECT_SKELETON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^(SELECT)\s+(TOP\(\d+\))?\s*(.*?)\s*(FROM\b.*)$")
        .expect("valid select skeleton regex")
});

/// `WHERE` as a keyword. Bracket-quoted identifiers and string literals are matched as a
/// whole so that a `WHERE` inside them is skipped.
static WHERE_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[[^\]]*\]|'(?:[^']|'')*'|\bWHERE\b").expect("valid where keyword regex")
});

/// The parts of a base command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSkeleton<'a> {
    /// `TOP(n)` as written by the caller, or empty.
    pub top: &'a str,
    /// The column list as written by the caller, or empty.
    pub columns: &'a str,
    /// `FROM` and everything after it.
    pub from: &'a str,
    /// Whether the command already filters its rows.
    pub has_where: bool,
}

impl<'a> CommandSkeleton<'a> {
    pub fn parse(command_text: &'a str) -> Result<CommandSkeleton<'a>, Error> {
        let trimmed = command_text.trim();
        let captures = SELECT_SKELETON
            .captures(trimmed)
            .ok_or_else(|| Error::UnsupportedCommandShape(command_text.to_string()))?;
        let group = |index| captures.get(index).map_or("", |m| m.as_str());

        Ok(CommandSkeleton {
            top: group(2),
            columns: group(3),
            from: group(4),
            has_where: WHERE_KEYWORD
                .find_iter(trimmed)
                .any(|m| m.as_str().eq_ignore_ascii_case("where")),
        })
    }

    /// The keyword that introduces generated predicates.
    pub fn predicate_keyword(&self) -> sql::ast::PredicateKeyword {
        if self.has_where {
            sql::ast::PredicateKeyword::And
        } else {
            sql::ast::PredicateKeyword::Where
        }
    }
}
