//! Quantbot - a conversational SQL assistant for financial account data.

use quantbot::cli::Cli;
use quantbot::config::{Config, ConnectionConfig};
use quantbot::db::{self, Column, DatabaseClient, ForeignKey, MockDatabaseClient, Schema, Table};
use quantbot::error::{QuantbotError, Result};
use quantbot::llm;
use quantbot::logging;
use quantbot::repl;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();
    logging::init();

    if let Err(e) = run().await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let database: Box<dyn DatabaseClient> = if cli.mock_db {
        info!("Using in-memory mock database");
        Box::new(MockDatabaseClient::with_schema(demo_schema()))
    } else {
        let connection = resolve_connection(&cli, &config)?.ok_or_else(|| {
            QuantbotError::config(
                "No database connection configured. Pass a connection string or set up a config file.",
            )
        })?;
        info!("Connection: {}", connection.display_string());
        db::connect(&connection).await?
    };

    let provider = cli
        .llm
        .as_deref()
        .unwrap_or(config.llm.provider.as_str());
    let llm_client = llm::factory::create_client_by_name(provider, None)?;
    info!(provider, "LLM client ready");

    let result = repl::run_chat(database.as_ref(), llm_client).await;
    database.close().await?;
    result
}

/// Resolves the final connection configuration from CLI args, config file,
/// and environment, in that order of precedence.
fn resolve_connection(cli: &Cli, config: &Config) -> Result<Option<ConnectionConfig>> {
    // Start with CLI connection config if provided
    let mut connection = cli.to_connection_config()?;

    // If no CLI connection, try named connection from config
    if connection.is_none() {
        if let Some(name) = cli.connection_name() {
            connection = config.get_connection(Some(name)).cloned();
            if connection.is_none() {
                return Err(QuantbotError::config(format!(
                    "Connection '{}' not found in config file",
                    name
                )));
            }
        }
    }

    // If still no connection, try default from config
    if connection.is_none() {
        connection = config.get_connection(None).cloned();
    }

    // Apply environment variable defaults
    if let Some(ref mut conn) = connection {
        conn.apply_env_defaults();
    }

    Ok(connection)
}

/// Schema served by `--mock-db`, mirroring the tables the prompt examples
/// reference so the assistant is usable without a live database.
fn demo_schema() -> Schema {
    Schema {
        tables: vec![
            Table {
                name: "okx_accounts".to_string(),
                columns: vec![
                    Column::new("id", "int").nullable(false),
                    Column::new("data", "json").nullable(false),
                    Column::new("created_at", "timestamp")
                        .nullable(false)
                        .with_default("CURRENT_TIMESTAMP"),
                ],
                primary_key: vec!["id".to_string()],
                indexes: vec![],
            },
            Table {
                name: "metrics".to_string(),
                columns: vec![
                    Column::new("id", "int").nullable(false),
                    Column::new("account_id", "int").nullable(false),
                    Column::new("pnl", "decimal(18,8)").nullable(false),
                    Column::new("created_at", "timestamp")
                        .nullable(false)
                        .with_default("CURRENT_TIMESTAMP"),
                ],
                primary_key: vec!["id".to_string()],
                indexes: vec![],
            },
        ],
        foreign_keys: vec![ForeignKey::new(
            "metrics",
            vec!["account_id".to_string()],
            "okx_accounts",
            vec!["id".to_string()],
        )],
    }
}
