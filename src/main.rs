//! Command-line interface for pg-loadtest
//!
//! # Usage Examples
//!
//! ## Batch loading
//! ```bash
//! # Insert 10,000 products in batches of 1,000, committing each batch
//! pg-loadtest --connector-config debezium-connector-config/pg-connector.json \
//!   populate --row-count 10000 --batch-size 1000
//! ```
//!
//! ## DML lifecycle
//! ```bash
//! # Insert one million rows across 10 workers
//! pg-loadtest lifecycle --phase insert --table lifecycle_test --create-table
//!
//! # Update, then delete, the same range
//! pg-loadtest lifecycle --phase update --table lifecycle_test
//! pg-loadtest lifecycle --phase delete --table lifecycle_test
//! ```
//!
//! ## Connection settings
//! - `--connection-string` / `POSTGRESQL_CONNECTION_STRING` is used verbatim
//! - otherwise `--connector-config` (or built-in defaults) supplies the base
//!   parameters, overridden by `--host`, `--port`, `--dbname`, `--user`,
//!   `--password` or the matching `PG*` environment variables

use clap::{Parser, Subcommand};
use loadtest_connection::ConnectionArgs;
use loadtest_lifecycle::LifecycleArgs;
use loadtest_populate_postgresql::PopulateArgs;
use pg_loadtest::loadtest::{run_lifecycle, run_populate};

#[derive(Parser)]
#[command(name = "pg-loadtest")]
#[command(about = "Bulk loader and DML lifecycle load tester for PostgreSQL")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert synthetic product rows in fixed-size, individually committed batches
    Populate {
        #[command(flatten)]
        args: PopulateArgs,
    },

    /// Run insert/update/delete phases across concurrent workers
    Lifecycle {
        #[command(flatten)]
        args: LifecycleArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    pg_loadtest::logging::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Populate { args } => {
            run_populate(&cli.connection, &args).await?;
        }
        Commands::Lifecycle { args } => {
            run_lifecycle(&cli.connection, &args).await?;
        }
    }

    Ok(())
}
