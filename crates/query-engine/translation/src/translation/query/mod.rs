//! Translate a parsed query on top of a caller supplied SELECT command.

pub mod command;
pub mod count;
pub mod filtering;
pub mod paging;
pub mod projection;
pub mod sorting;

use once_cell::unsync::OnceCell;

use odata_models::ParsedQuery;
use query_engine_metadata::metadata::Resolvers;
use query_engine_sql::sql;

use super::error::Error;
use super::helpers::Env;
use command::CommandSkeleton;

pub use command::DEFAULT_COMMAND_TEXT;

/// Translate the query on top of the command. Placeholders of the values taken from the
/// filter are numbered after the positional arguments the command already uses.
pub fn translate(
    command_text: &str,
    positional_arguments: Vec<serde_json::Value>,
    query: &ParsedQuery,
    resolvers: &Resolvers,
) -> Result<sql::string::SQL, Error> {
    let select = translate_select(command_text, query, resolvers)?;
    let sql = sql::helpers::select_to_sql(&select, positional_arguments);

    tracing::debug!(
        sql = %sql.sql,
        arguments = sql.params.len(),
        entity_type = %query.entity_type,
        "translated query"
    );
    Ok(sql)
}

/// Translate the row count companion of the query. There is none unless the query asks
/// for a count.
pub fn translate_count(
    command_text: &str,
    positional_arguments: Vec<serde_json::Value>,
    query: &ParsedQuery,
    resolvers: &Resolvers,
) -> Result<Option<sql::string::SQL>, Error> {
    if !query.wants_count() {
        return Ok(None);
    }
    translate_row_count(command_text, positional_arguments, query, resolvers).map(Some)
}

fn translate_row_count(
    command_text: &str,
    positional_arguments: Vec<serde_json::Value>,
    query: &ParsedQuery,
    resolvers: &Resolvers,
) -> Result<sql::string::SQL, Error> {
    let skeleton = CommandSkeleton::parse(command_text)?;
    let env = Env::new(query, resolvers);
    let select = count::translate(&env, &skeleton)?;
    let sql = sql::helpers::select_to_sql(&select, positional_arguments);

    tracing::debug!(
        sql = %sql.sql,
        arguments = sql.params.len(),
        entity_type = %query.entity_type,
        "translated count query"
    );
    Ok(sql)
}

/// Build the SELECT: what the command specifies wins over what the query options say.
pub fn translate_select(
    command_text: &str,
    query: &ParsedQuery,
    resolvers: &Resolvers,
) -> Result<sql::ast::Select, Error> {
    let skeleton = CommandSkeleton::parse(command_text)?;
    let env = Env::new(query, resolvers);

    let top = if skeleton.top.is_empty() {
        projection::translate_top(&env)
    } else {
        sql::ast::Top::Verbatim(skeleton.top.to_string())
    };
    let select_list = if skeleton.columns.is_empty() {
        projection::translate(&env)?
    } else {
        sql::ast::SelectList::Verbatim(skeleton.columns.to_string())
    };

    Ok(sql::ast::Select {
        top,
        select_list,
        from: sql::ast::RawSql(skeleton.from.to_string()),
        where_: filtering::translate(&env, skeleton.predicate_keyword())?,
        order_by: sorting::translate(&env)?,
        paging: paging::translate(&env),
    })
}

/// A query translated on first use.
///
/// The translation is cached, so the command text and the arguments always agree. The cache
/// is not synchronized: an instance belongs to a single request and is not shared between
/// threads.
#[derive(Debug)]
pub struct SqlQuery<'a> {
    command_text: String,
    positional_arguments: Vec<serde_json::Value>,
    query: &'a ParsedQuery,
    resolvers: &'a Resolvers,
    count: Option<CountSqlQuery<'a>>,
    result: OnceCell<sql::string::SQL>,
}

impl<'a> SqlQuery<'a> {
    pub fn new(
        command_text: impl Into<String>,
        positional_arguments: Vec<serde_json::Value>,
        query: &'a ParsedQuery,
        resolvers: &'a Resolvers,
    ) -> SqlQuery<'a> {
        let command_text = command_text.into();
        let count = query.wants_count().then(|| CountSqlQuery {
            command_text: command_text.clone(),
            positional_arguments: positional_arguments.clone(),
            query,
            resolvers,
            result: OnceCell::new(),
        });

        SqlQuery {
            command_text,
            positional_arguments,
            query,
            resolvers,
            count,
            result: OnceCell::new(),
        }
    }

    /// The query on top of `SELECT FROM`, without positional arguments.
    pub fn from_query(query: &'a ParsedQuery, resolvers: &'a Resolvers) -> SqlQuery<'a> {
        SqlQuery::new(DEFAULT_COMMAND_TEXT, vec![], query, resolvers)
    }

    pub fn command_text(&self) -> Result<&str, Error> {
        Ok(self.result()?.sql.as_str())
    }

    /// The positional arguments followed by the values taken from the filter.
    pub fn arguments(&self) -> Result<&[serde_json::Value], Error> {
        Ok(self.result()?.params.as_slice())
    }

    /// The row count companion, present when the query asks for a count.
    pub fn count(&self) -> Option<&CountSqlQuery<'a>> {
        self.count.as_ref()
    }

    fn result(&self) -> Result<&sql::string::SQL, Error> {
        self.result.get_or_try_init(|| {
            translate(
                &self.command_text,
                self.positional_arguments.clone(),
                self.query,
                self.resolvers,
            )
        })
    }
}

/// The row count companion of a [`SqlQuery`]. It shares the query and the resolvers of its
/// parent but is translated and cached on its own.
#[derive(Debug)]
pub struct CountSqlQuery<'a> {
    command_text: String,
    positional_arguments: Vec<serde_json::Value>,
    query: &'a ParsedQuery,
    resolvers: &'a Resolvers,
    result: OnceCell<sql::string::SQL>,
}

impl CountSqlQuery<'_> {
    pub fn command_text(&self) -> Result<&str, Error> {
        Ok(self.result()?.sql.as_str())
    }

    pub fn arguments(&self) -> Result<&[serde_json::Value], Error> {
        Ok(self.result()?.params.as_slice())
    }

    fn result(&self) -> Result<&sql::string::SQL, Error> {
        self.result.get_or_try_init(|| {
            translate_row_count(
                &self.command_text,
                self.positional_arguments.clone(),
                self.query,
                self.resolvers,
            )
        })
    }
}
