//! Print or apply the record table schema for the configured store.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use clap::Parser;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use recordstore::config::StoreSettings;
use recordstore::domain::Dialect;
use recordstore::domain::ports::SqlExecutor;
use recordstore::outbound::persistence::{PostgresSqlExecutor, SqliteSqlExecutor};
use recordstore::outbound::sql::create_table_sql;
use recordstore::RecordStore;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `recordstore-schema` command arguments.
///
/// Connection, dialect and table come from `RECORDSTORE_*` settings.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "recordstore-schema",
    about = "Print or apply the record table schema",
    version
)]
struct CliArgs {
    /// Create the table in the configured database instead of printing DDL.
    #[arg(long)]
    apply: bool,
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let settings = StoreSettings::load_from_iter([OsString::from("recordstore-schema")])
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    let dialect = settings
        .parsed_dialect()
        .map_err(|error| io::Error::other(format!("resolve dialect: {error}")))?;

    if !args.apply {
        println!("{}", create_table_sql(dialect, settings.table_name()));
        return Ok(());
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(apply(settings, dialect))
}

async fn apply(settings: StoreSettings, dialect: Dialect) -> io::Result<()> {
    let config = settings.executor_config().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "RECORDSTORE_DATABASE_URL is required with --apply",
        )
    })?;

    let executor: Arc<dyn SqlExecutor> = match dialect {
        Dialect::Sqlite => Arc::new(
            SqliteSqlExecutor::connect(config.database_url())
                .await
                .map_err(|error| io::Error::other(format!("open sqlite database: {error}")))?,
        ),
        Dialect::Postgres => Arc::new(
            PostgresSqlExecutor::connect(&config)
                .await
                .map_err(|error| io::Error::other(format!("connect to postgres: {error}")))?,
        ),
        Dialect::MySql | Dialect::MsSql => {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!("no executor available for the {dialect} dialect"),
            ));
        }
    };

    let options = settings
        .store_options()
        .map_err(|error| io::Error::other(format!("resolve store options: {error}")))?
        .with_automigrate(true);
    let store = RecordStore::open(executor, Arc::new(DefaultClock), options)
        .await
        .map_err(|error| io::Error::other(format!("apply schema: {error}")))?;

    println!("table={}", store.table_name());
    println!("dialect={}", store.dialect());
    Ok(())
}
