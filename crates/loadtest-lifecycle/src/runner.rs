//! Phase orchestration: partition, fan out, wait, report.

use crate::error::LifecycleError;
use crate::metrics::{PhaseReport, WorkerReport};
use crate::partitioner::{describe_partitioning, partition};
use crate::phase::Phase;
use crate::worker::run_worker;
use chrono::Utc;
use loadtest_connection::qualified_table;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{error, info, info_span, Instrument};

pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_PROCESSES: usize = 10;
pub const DEFAULT_TOTAL_ROWS: u64 = 1_000_000;
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Settings for a lifecycle run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleConfig {
    pub table: String,
    pub schema: String,
    pub processes: usize,
    pub total_rows: u64,
    pub batch_size: usize,
    pub start_id: u64,
}

impl LifecycleConfig {
    /// Config for `table` with the default sizes.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            schema: DEFAULT_SCHEMA.to_string(),
            processes: DEFAULT_PROCESSES,
            total_rows: DEFAULT_TOTAL_ROWS,
            batch_size: DEFAULT_BATCH_SIZE,
            start_id: 0,
        }
    }

    /// Check the settings can drive `phase`.
    pub fn validate(&self, phase: Phase) -> Result<(), LifecycleError> {
        if self.processes == 0 {
            return Err(LifecycleError::Config(
                "process count must be greater than zero".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(LifecycleError::Config(
                "batch size must be greater than zero".to_string(),
            ));
        }
        if self.batch_size > phase.max_batch_size() {
            return Err(LifecycleError::Config(format!(
                "batch size {} exceeds the maximum of {} rows per {} statement",
                self.batch_size,
                phase.max_batch_size(),
                phase
            )));
        }
        qualified_table(&self.schema, &self.table)?;
        partition(self.total_rows, self.processes, self.start_id)?;
        Ok(())
    }

    /// Quoted, schema-qualified table name.
    pub fn qualified_table(&self) -> Result<String, LifecycleError> {
        Ok(qualified_table(&self.schema, &self.table)?)
    }
}

/// Run one phase across all workers and wait for every one of them.
///
/// Workers are independent: a failing worker does not stop the others. The
/// phase fails if any worker failed, after all have finished.
pub async fn run_phase(
    phase: Phase,
    connection_string: &str,
    config: &LifecycleConfig,
) -> Result<PhaseReport, LifecycleError> {
    config.validate(phase)?;
    let table = config.qualified_table()?;

    info!("{}", "=".repeat(30));
    info!(
        "Starting {} phase for table: '{}'",
        phase.to_string().to_uppercase(),
        config.table
    );
    info!(
        "Total Rows: {}, Processes: {}, Batch Size: {}",
        config.total_rows, config.processes, config.batch_size
    );
    info!("{}", "-".repeat(30));

    let assignments = partition(config.total_rows, config.processes, config.start_id)?;
    info!("{}", describe_partitioning(&assignments));

    let started_at = Utc::now();
    let start = Instant::now();

    let mut tasks = JoinSet::new();
    for assignment in assignments.iter().copied() {
        let connection_string = connection_string.to_string();
        let table = table.clone();
        let batch_size = config.batch_size;
        let span = info_span!("worker", id = assignment.worker_id);
        tasks.spawn(
            async move {
                run_worker(phase, &connection_string, &table, assignment, batch_size).await
            }
            .instrument(span),
        );
    }

    let mut workers: Vec<WorkerReport> = Vec::with_capacity(assignments.len());
    let mut failures = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(report)) => workers.push(report),
            Ok(Err(e)) => {
                error!("{} worker failed: {}", phase, e);
                failures.push(e.to_string());
            }
            Err(e) => {
                error!("{} worker task aborted: {}", phase, e);
                failures.push(format!("worker task aborted: {e}"));
            }
        }
    }

    if !failures.is_empty() {
        return Err(LifecycleError::WorkersFailed {
            phase,
            total: assignments.len(),
            failures,
        });
    }

    workers.sort_by_key(|w| w.worker_id);
    let duration = start.elapsed();
    let rows_affected: u64 = workers.iter().map(|w| w.rows_affected).sum();
    let rows_per_second = if duration.as_secs_f64() > 0.0 {
        rows_affected as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    let report = PhaseReport {
        phase,
        table,
        total_rows: config.total_rows,
        processes: config.processes,
        batch_size: config.batch_size,
        started_at,
        completed_at: Utc::now(),
        duration_ms: duration.as_millis() as u64,
        rows_affected,
        rows_per_second,
        workers,
    };

    info!("{}", "-".repeat(30));
    info!(
        "{} phase complete for table '{}'.",
        phase.to_string().to_uppercase(),
        config.table
    );
    info!("Total time taken: {:.2} seconds.", report.duration_secs());
    info!("{}", "=".repeat(30));

    Ok(report)
}

/// Create `(id BIGINT PRIMARY KEY, payload TEXT)` if it does not exist.
pub async fn create_table(
    connection_string: &str,
    config: &LifecycleConfig,
) -> Result<(), LifecycleError> {
    let table = config.qualified_table()?;
    let client = loadtest_connection::connect(connection_string).await?;
    let sql = format!("CREATE TABLE IF NOT EXISTS {table} (id BIGINT PRIMARY KEY, payload TEXT)");
    info!("Creating table: {}", table);
    client.execute(sql.as_str(), &[]).await?;
    Ok(())
}
