//! A single lifecycle worker.

use crate::error::LifecycleError;
use crate::metrics::WorkerReport;
use crate::partitioner::WorkerAssignment;
use crate::phase::{insert_payload, update_payload, Phase};
use std::time::Instant;
use tokio_postgres::types::ToSql;
use tokio_postgres::Transaction;
use tracing::{debug, info, warn};

/// Run one phase over one assignment on a dedicated connection.
///
/// All pages execute inside a single transaction that is committed once at
/// the end, so a failing worker leaves no partial changes behind.
pub async fn run_worker(
    phase: Phase,
    connection_string: &str,
    quoted_table: &str,
    assignment: WorkerAssignment,
    batch_size: usize,
) -> Result<WorkerReport, LifecycleError> {
    if batch_size == 0 {
        return Err(LifecycleError::Config(
            "batch size must be greater than zero".to_string(),
        ));
    }

    info!(
        "Starting {}, assigned {} rows starting from ID {}.",
        phase.to_string().to_uppercase(),
        assignment.num_rows,
        assignment.start_id
    );
    let start = Instant::now();

    let mut client = loadtest_connection::connect(connection_string).await?;
    let tx = client.transaction().await?;

    let ids: Vec<i64> = assignment.ids().collect();
    let mut rows_affected = 0u64;
    for page in ids.chunks(batch_size) {
        rows_affected += execute_page(&tx, phase, quoted_table, page).await?;
        debug!("Page of {} rows executed", page.len());
    }

    tx.commit().await?;

    if rows_affected != assignment.num_rows {
        warn!(
            "{} affected {} rows, expected {}",
            phase, rows_affected, assignment.num_rows
        );
    }
    info!(
        "Successfully {} {} rows.",
        phase.past_tense(),
        rows_affected
    );

    Ok(WorkerReport {
        worker_id: assignment.worker_id,
        start_id: assignment.start_id,
        num_rows: assignment.num_rows,
        rows_affected,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

async fn execute_page(
    tx: &Transaction<'_>,
    phase: Phase,
    quoted_table: &str,
    ids: &[i64],
) -> Result<u64, LifecycleError> {
    let sql = phase.build_sql(quoted_table, ids.len());

    let affected = match phase {
        Phase::Insert | Phase::Update => {
            let payloads: Vec<String> = match phase {
                Phase::Insert => ids.iter().map(|id| insert_payload(*id)).collect(),
                _ => ids.iter().map(|_| update_payload()).collect(),
            };
            let mut params: Vec<&(dyn ToSql + Sync)> = Vec::with_capacity(ids.len() * 2);
            for (id, payload) in ids.iter().zip(&payloads) {
                params.push(id);
                params.push(payload);
            }
            tx.execute(sql.as_str(), &params).await?
        }
        Phase::Delete => {
            let ids = ids.to_vec();
            tx.execute(sql.as_str(), &[&ids]).await?
        }
    };

    Ok(affected)
}
