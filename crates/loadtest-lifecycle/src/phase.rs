//! Lifecycle phases and the statements each one executes.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// A single DML phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Insert,
    Update,
    Delete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Insert => write!(f, "insert"),
            Phase::Update => write!(f, "update"),
            Phase::Delete => write!(f, "delete"),
        }
    }
}

/// Phase requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PhaseSelection {
    Insert,
    Update,
    Delete,
    /// Insert, then update, then delete the same range.
    All,
}

impl PhaseSelection {
    pub fn phases(self) -> Vec<Phase> {
        match self {
            PhaseSelection::Insert => vec![Phase::Insert],
            PhaseSelection::Update => vec![Phase::Update],
            PhaseSelection::Delete => vec![Phase::Delete],
            PhaseSelection::All => vec![Phase::Insert, Phase::Update, Phase::Delete],
        }
    }
}

impl Phase {
    /// Past tense used in worker log lines.
    pub fn past_tense(self) -> &'static str {
        match self {
            Phase::Insert => "INSERTED",
            Phase::Update => "UPDATED",
            Phase::Delete => "DELETED",
        }
    }

    /// Bind parameters one row contributes to a page statement.
    pub fn params_per_row(self) -> usize {
        match self {
            Phase::Insert | Phase::Update => 2,
            Phase::Delete => 0,
        }
    }

    /// Largest page that fits in one statement.
    pub fn max_batch_size(self) -> usize {
        match self.params_per_row() {
            0 => usize::MAX,
            n => u16::MAX as usize / n,
        }
    }

    /// Build the statement for a page of `row_count` rows.
    pub fn build_sql(self, quoted_table: &str, row_count: usize) -> String {
        match self {
            Phase::Insert => build_insert_sql(quoted_table, row_count),
            Phase::Update => build_update_sql(quoted_table, row_count),
            Phase::Delete => build_delete_sql(quoted_table),
        }
    }
}

/// `INSERT INTO t (id, payload) VALUES ($1::bigint, $2::text), ...`
///
/// Parameters are cast explicitly so the target columns may be any integer
/// and string types.
pub fn build_insert_sql(quoted_table: &str, row_count: usize) -> String {
    format!(
        "INSERT INTO {quoted_table} (id, payload) VALUES {}",
        pair_placeholders(row_count)
    )
}

/// Update a page of rows by id from a VALUES list.
pub fn build_update_sql(quoted_table: &str, row_count: usize) -> String {
    format!(
        "UPDATE {quoted_table} AS t SET payload = v.payload FROM (VALUES {}) AS v(id, payload) WHERE t.id = v.id",
        pair_placeholders(row_count)
    )
}

/// Delete a page of ids bound as a single `bigint[]`.
pub fn build_delete_sql(quoted_table: &str) -> String {
    format!("DELETE FROM {quoted_table} WHERE id = ANY($1::bigint[])")
}

fn pair_placeholders(row_count: usize) -> String {
    (0..row_count)
        .map(|r| format!("(${}::bigint, ${}::text)", 2 * r + 1, 2 * r + 2))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Payload written by the insert phase.
pub fn insert_payload(id: i64) -> String {
    format!("Payload for row {id} - {}", uuid::Uuid::new_v4())
}

/// Payload written by the update phase.
pub fn update_payload() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("Updated payload at {nanos} - {}", uuid::Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_expands() {
        assert_eq!(PhaseSelection::Update.phases(), vec![Phase::Update]);
        assert_eq!(
            PhaseSelection::All.phases(),
            vec![Phase::Insert, Phase::Update, Phase::Delete]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Phase::Insert.to_string(), "insert");
        assert_eq!(Phase::Delete.past_tense(), "DELETED");
    }

    #[test]
    fn test_insert_sql() {
        assert_eq!(
            build_insert_sql("\"public\".\"t\"", 2),
            "INSERT INTO \"public\".\"t\" (id, payload) VALUES ($1::bigint, $2::text), ($3::bigint, $4::text)"
        );
    }

    #[test]
    fn test_update_sql() {
        assert_eq!(
            build_update_sql("\"public\".\"t\"", 2),
            "UPDATE \"public\".\"t\" AS t SET payload = v.payload \
             FROM (VALUES ($1::bigint, $2::text), ($3::bigint, $4::text)) AS v(id, payload) \
             WHERE t.id = v.id"
        );
    }

    #[test]
    fn test_delete_sql() {
        assert_eq!(
            Phase::Delete.build_sql("\"public\".\"t\"", 100),
            "DELETE FROM \"public\".\"t\" WHERE id = ANY($1::bigint[])"
        );
    }

    #[test]
    fn test_max_batch_size() {
        assert_eq!(Phase::Insert.max_batch_size(), 32767);
        assert_eq!(Phase::Update.max_batch_size(), 32767);
        assert_eq!(Phase::Delete.max_batch_size(), usize::MAX);
    }

    #[test]
    fn test_payloads() {
        let payload = insert_payload(7);
        assert!(payload.starts_with("Payload for row 7 - "));
        assert_ne!(insert_payload(7), payload);

        assert!(update_payload().starts_with("Updated payload at "));
    }

    #[test]
    fn test_phase_serde() {
        assert_eq!(serde_json::to_string(&Phase::Update).unwrap(), "\"update\"");
    }
}
