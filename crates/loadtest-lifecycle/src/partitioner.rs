//! Work partitioning across lifecycle workers.
//!
//! The id range `[start_id, start_id + total_rows)` is cut into contiguous
//! slices, one per worker. Slices differ in size by at most one row: the
//! remainder of `total_rows / processes` goes one row each to the first
//! workers, so every id is covered exactly once.

use crate::error::LifecycleError;

/// The id slice one worker is responsible for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerAssignment {
    /// 1-based worker number, used in log lines.
    pub worker_id: usize,
    /// First id in the slice.
    pub start_id: i64,
    /// Number of consecutive ids in the slice.
    pub num_rows: u64,
}

impl WorkerAssignment {
    /// Ids covered by this assignment.
    pub fn ids(&self) -> impl Iterator<Item = i64> {
        let start = self.start_id;
        (0..self.num_rows as i64).map(move |offset| start + offset)
    }
}

/// Partition `total_rows` ids starting at `start_id` across `processes` workers.
///
/// Workers that would receive no rows are not created. Ids are `bigint`, so
/// the whole range must stay within `i64`.
pub fn partition(
    total_rows: u64,
    processes: usize,
    start_id: u64,
) -> Result<Vec<WorkerAssignment>, LifecycleError> {
    if processes == 0 {
        return Err(LifecycleError::Config(
            "process count must be greater than zero".to_string(),
        ));
    }
    let range = i64::try_from(start_id).ok().and_then(|start| {
        i64::try_from(total_rows)
            .ok()
            .and_then(|rows| start.checked_add(rows))
            .map(|_| start)
    });
    let Some(first_id) = range else {
        return Err(LifecycleError::Config(format!(
            "id range starting at {start_id} with {total_rows} rows exceeds the bigint range"
        )));
    };

    let workers = processes as u64;
    let base = total_rows / workers;
    let remainder = total_rows % workers;

    let mut assignments = Vec::with_capacity(processes);
    let mut next_id = first_id;
    for i in 0..workers {
        let num_rows = base + u64::from(i < remainder);
        if num_rows == 0 {
            break;
        }
        assignments.push(WorkerAssignment {
            worker_id: assignments.len() + 1,
            start_id: next_id,
            num_rows,
        });
        next_id += num_rows as i64;
    }

    Ok(assignments)
}

/// Describe the partitioning plan for logging.
pub fn describe_partitioning(assignments: &[WorkerAssignment]) -> String {
    let mut lines = Vec::new();
    lines.push("Work distribution:".to_string());

    for a in assignments {
        let end = a.start_id + a.num_rows as i64 - 1;
        lines.push(format!(
            "  worker-{}: ids {}..={} ({} rows)",
            a.worker_id, a.start_id, end, a.num_rows
        ));
    }

    lines.join("\n")
}
