//! Phase and worker metrics.

use crate::phase::Phase;
use chrono::{DateTime, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use serde::{Deserialize, Serialize};

/// Outcome of one worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerReport {
    pub worker_id: usize,
    pub start_id: i64,
    /// Rows assigned to the worker
    pub num_rows: u64,
    /// Rows the database reported as affected
    pub rows_affected: u64,
    pub duration_ms: u64,
}

/// Outcome of a whole phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseReport {
    pub phase: Phase,
    /// Schema-qualified table name
    pub table: String,
    pub total_rows: u64,
    pub processes: usize,
    pub batch_size: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    /// Wall clock duration in milliseconds
    pub duration_ms: u64,
    pub rows_affected: u64,
    /// Affected rows over wall clock time
    pub rows_per_second: f64,
    pub workers: Vec<WorkerReport>,
}

impl PhaseReport {
    /// Wall clock duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_ms as f64 / 1000.0
    }

    /// Format the per-worker breakdown as a table.
    pub fn render_table(&self) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Worker", "Start ID", "Rows", "Affected", "Duration"]);

        for worker in &self.workers {
            let affected = if worker.rows_affected == worker.num_rows {
                Cell::new(format_number(worker.rows_affected))
            } else {
                Cell::new(format_number(worker.rows_affected)).fg(Color::Yellow)
            };
            table.add_row(vec![
                Cell::new(format!("worker-{}", worker.worker_id)),
                Cell::new(worker.start_id),
                Cell::new(format_number(worker.num_rows)),
                affected,
                Cell::new(format!("{:.2}s", worker.duration_ms as f64 / 1000.0)),
            ]);
        }

        table.add_row(vec![
            Cell::new("TOTAL").fg(Color::Cyan),
            Cell::new("-"),
            Cell::new(format_number(self.total_rows)),
            Cell::new(format_number(self.rows_affected)),
            Cell::new(format!("{:.2}s*", self.duration_secs())),
        ]);

        format!("{table}\n* Wall clock (parallel)")
    }
}

/// Format a number with thousands separators.
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}
