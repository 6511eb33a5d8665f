//! Populate command runner.

use anyhow::Context;
use loadtest_connection::ConnectionArgs;
use loadtest_populate_postgresql::{
    batch_ranges, PopulateArgs, PopulateMetrics, PostgreSQLPopulator,
};

/// Run the populate command: insert synthetic products in committed batches.
pub async fn run_populate(
    connection: &ConnectionArgs,
    args: &PopulateArgs,
) -> anyhow::Result<Option<PopulateMetrics>> {
    let (conn_str, masked) = connection
        .resolve()
        .context("Failed to resolve PostgreSQL connection settings")?;
    batch_ranges(args.start_index, args.row_count, args.batch_size)
        .map(|_| ())
        .context("Invalid --start-index / --row-count / --batch-size")?;
    loadtest_connection::quote_ident(&args.table).context("Invalid --table")?;

    if args.dry_run {
        tracing::info!(
            "[DRY-RUN] Would populate '{}' with {} rows (batch size {}, start index {})",
            args.table,
            args.row_count,
            args.batch_size,
            args.start_index
        );
        tracing::info!("[DRY-RUN] Connection: {}", masked);
        tracing::info!("[DRY-RUN] Configuration validated successfully");
        return Ok(None);
    }

    tracing::info!("Connecting to PostgreSQL: {}", masked);
    let mut populator = PostgreSQLPopulator::new(&conn_str, &args.table)
        .await
        .context("Failed to connect to PostgreSQL")?
        .with_batch_size(args.batch_size)
        .with_start_index(args.start_index);

    if args.create_table {
        populator
            .create_table()
            .await
            .with_context(|| format!("Failed to create table '{}'", args.table))?;
    }

    let metrics = populator
        .populate(args.row_count)
        .await
        .with_context(|| format!("Failed to populate table '{}'", args.table))?;

    tracing::info!(
        "Populated {}: {} rows in {} batches, {:?} ({:.2} rows/sec; generation {:?}, insert {:?})",
        args.table,
        metrics.rows_inserted,
        metrics.batch_count,
        metrics.total_duration,
        metrics.rows_per_second(),
        metrics.generation_duration,
        metrics.insert_duration
    );

    Ok(Some(metrics))
}
