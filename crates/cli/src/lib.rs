//! The odata-sql command line tool.
//!
//! Translates a parsed query read from a JSON file into SQL, using the metadata and the policy
//! stored in a configuration directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Subcommand;
use serde::{Deserialize, Serialize};
use tokio::fs;

use odata_sql::models::ParsedQuery;
use odata_sql::SqlQuery;
use odata_sql_configuration as configuration;

/// The various contextual bits and bobs we need to run.
pub struct Context {
    pub output: Box<dyn std::io::Write>,
}

/// The command invoked by the user.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Translate a parsed query into SQL.
    Translate {
        /// The directory holding the configuration.
        #[arg(long, env = "ODATA_SQL_CONFIGURATION")]
        configuration: PathBuf,
        /// A JSON file holding the request.
        #[arg(long)]
        request: PathBuf,
        /// The SELECT command to build upon. Overrides the one in the request.
        #[arg(long)]
        command: Option<String>,
        /// Skip checking the query against the configured policy.
        #[arg(long)]
        no_validate: bool,
        /// Format the generated SQL.
        #[arg(long)]
        pretty: bool,
    },
    /// Write a default configuration into a directory.
    Initialize {
        #[arg(long, env = "ODATA_SQL_CONFIGURATION")]
        configuration: PathBuf,
    },
    /// Print the JSON schema of the configuration file.
    PrintSchema,
}

/// What the translate command reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub arguments: Vec<serde_json::Value>,
    pub query: ParsedQuery,
}

/// What the translate command prints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    pub sql: String,
    pub arguments: Vec<serde_json::Value>,
    pub count: Option<CountOutput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountOutput {
    pub sql: String,
    pub arguments: Vec<serde_json::Value>,
}

/// Run a command in a given directory.
pub async fn run(command: Command, mut context: Context) -> anyhow::Result<()> {
    match command {
        Command::Translate {
            configuration,
            request,
            command,
            no_validate,
            pretty,
        } => {
            let output = translate(&configuration, &request, command, !no_validate, pretty).await?;
            serde_json::to_writer_pretty(&mut context.output, &output)?;
            writeln!(context.output)?;
        }
        Command::Initialize { configuration } => initialize(&configuration).await?,
        Command::PrintSchema => {
            let schema = configuration::version1::configuration_jsonschema();
            serde_json::to_writer_pretty(&mut context.output, &schema)?;
            writeln!(context.output)?;
        }
    }
    Ok(())
}

/// Translate the request found in a file, with the configuration found in a directory.
pub async fn translate(
    configuration_dir: &Path,
    request_file: &Path,
    command: Option<String>,
    validate: bool,
    pretty: bool,
) -> anyhow::Result<Output> {
    let parsed = configuration::parse_configuration(configuration_dir).await?;
    let configuration = configuration::make_runtime_configuration(parsed)?;

    let request_contents = fs::read_to_string(request_file)
        .await
        .with_context(|| format!("reading {}", request_file.display()))?;
    let request: Request = serde_json::from_str(&request_contents)
        .with_context(|| format!("parsing {}", request_file.display()))?;

    if validate {
        odata_sql::validate(&request.query, &configuration.validation)?;
    }

    let command_text = command
        .or(request.command)
        .unwrap_or_else(|| odata_sql::DEFAULT_COMMAND_TEXT.to_string());
    let resolvers = configuration.resolvers(&request.query.entity_type);
    let query = SqlQuery::new(command_text, request.arguments, &request.query, &resolvers);

    let count = match query.count() {
        Some(count) => Some(CountOutput {
            sql: format_sql(count.command_text()?, pretty),
            arguments: count.arguments()?.to_vec(),
        }),
        None => None,
    };
    Ok(Output {
        sql: format_sql(query.command_text()?, pretty),
        arguments: query.arguments()?.to_vec(),
        count,
    })
}

/// Write the initial configuration into a directory.
pub async fn initialize(configuration_dir: &Path) -> anyhow::Result<()> {
    if configuration_dir
        .join(configuration::CONFIGURATION_FILENAME)
        .exists()
    {
        anyhow::bail!(
            "a configuration already exists in {}",
            configuration_dir.display()
        );
    }
    configuration::write_parsed_configuration(
        configuration::ParsedConfiguration::initial(),
        configuration_dir,
    )
    .await?;
    tracing::info!(directory = %configuration_dir.display(), "initialized configuration");
    Ok(())
}

fn format_sql(sql: &str, pretty: bool) -> String {
    if pretty {
        sqlformat::format(
            sql,
            &sqlformat::QueryParams::None,
            sqlformat::FormatOptions::default(),
        )
    } else {
        sql.to_string()
    }
}
