mod commands;
mod config;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use commands::{DbCommand, MotorcycleCommand, RecordCommand};
use config::{redact_url, ConfigError, LogFormat, Settings, CONFIG_PATH_ENV};
use logging::init_logging;
use motocat_core::{CatalogError, ErrorKind};
use motocat_store::{connect, PgCatalog, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("{}", .0.user_message())]
    Catalog(#[from] CatalogError),
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Catalog(err) => match err.kind() {
                ErrorKind::MissingField => 2,
                ErrorKind::NotFound => 3,
                ErrorKind::DuplicateEntry => 4,
                ErrorKind::InternalError => 1,
            },
            CliError::Config(_) | CliError::InvalidArgs(_) => 64,
            CliError::Store(_) | CliError::Output(_) | CliError::Logging(_) => 1,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "motocat", version, about = "Motorcycle catalog CLI")]
struct Cli {
    /// TOML config file (defaults to $MOTOCAT_CONFIG when set).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Database connection string; overrides DATABASE_URL and the config file.
    #[arg(long, global = true, value_name = "CONNECTION_STRING")]
    conn: Option<String>,
    /// Log output format.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Schema and seed management.
    #[command(subcommand)]
    Db(DbCommand),
    /// Manage categories.
    #[command(subcommand)]
    Categories(RecordCommand),
    /// Manage brands.
    #[command(subcommand)]
    Brands(RecordCommand),
    /// Manage motorcycles.
    #[command(subcommand)]
    Motorcycles(MotorcycleCommand),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        config,
        conn,
        log_format,
        command,
    } = cli;

    let config_path = config.or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));
    let mut settings =
        Settings::load(config_path.as_deref())?.with_env(|name| std::env::var(name).ok());
    if let Some(conn) = conn {
        settings.database_url = Some(conn);
    }
    if let Some(format) = log_format {
        settings.log.format = format;
    }

    init_logging(&settings.log).map_err(CliError::Logging)?;
    commands::check_forms(&command)?;

    let url = settings.database_url()?;
    tracing::info!(event = "connecting", database = %redact_url(url));

    let timer = Instant::now();
    let pool = connect(url, &settings.pool).await?;
    let catalog = PgCatalog::new(pool);

    let result = match command {
        Command::Db(action) => commands::run_db(&catalog, action).await,
        Command::Categories(action) => commands::run_categories(&catalog, action).await,
        Command::Brands(action) => commands::run_brands(&catalog, action).await,
        Command::Motorcycles(action) => commands::run_motorcycles(&catalog, action).await,
    };

    let duration_ms = timer.elapsed().as_millis();
    match &result {
        Ok(()) => tracing::debug!(event = "command_finished", status = "success", duration_ms),
        Err(err) => tracing::debug!(
            event = "command_finished",
            status = "failed",
            exit_code = err.exit_code(),
            duration_ms
        ),
    }
    catalog.pool().close().await;

    result
}

fn report(err: &CliError) {
    if let CliError::Catalog(catalog_err) = err {
        if let Some(form) = catalog_err.invalid_form() {
            eprintln!("{}", catalog_err.user_message());
            for field_error in &form.errors {
                eprintln!("  {}: {}", field_error.field, field_error.message);
            }
            if !form.input.is_empty() {
                eprintln!("submitted:");
                for (field, value) in form.input.iter() {
                    eprintln!("  {field}={value}");
                }
            }
            return;
        }
    }
    eprintln!("error: {err}");
}
