use std::fs;
use std::path::PathBuf;

use odata_models::ParsedQuery;
use query_engine_metadata::metadata::{Metadata, Resolvers};
use query_engine_translation::translation;
use serde::Deserialize;

/// A golden request: the base command, its positional arguments, and the parsed query.
#[derive(Deserialize)]
struct Request {
    #[serde(default = "default_command")]
    command: String,
    #[serde(default)]
    arguments: Vec<serde_json::Value>,
    #[serde(default)]
    metadata: Metadata,
    query: ParsedQuery,
}

fn default_command() -> String {
    translation::query::DEFAULT_COMMAND_TEXT.to_string()
}

/// A translated command with its arguments.
#[derive(Debug)]
pub struct Translated {
    pub sql: String,
    pub arguments: serde_json::Value,
}

/// Translate the golden request, and its row count companion when it asks for one.
pub fn test_translation(testname: &str) -> anyhow::Result<(Translated, Option<Translated>)> {
    let directory = PathBuf::from("tests/goldenfiles").join(testname);
    let request: Request =
        serde_json::from_str(&fs::read_to_string(directory.join("request.json"))?)?;
    let resolvers = Resolvers::from_metadata(&request.metadata, &request.query.entity_type);

    let query = translation::query::SqlQuery::new(
        request.command,
        request.arguments,
        &request.query,
        &resolvers,
    );
    let translated = Translated {
        sql: query.command_text()?.to_string(),
        arguments: serde_json::Value::Array(query.arguments()?.to_vec()),
    };
    let count = query
        .count()
        .map(|count| -> anyhow::Result<Translated> {
            Ok(Translated {
                sql: count.command_text()?.to_string(),
                arguments: serde_json::Value::Array(count.arguments()?.to_vec()),
            })
        })
        .transpose()?;

    Ok((translated, count))
}
