//! Row generation and batched INSERT logic for PostgreSQL population.

use crate::error::PostgreSQLPopulatorError;
use std::ops::Range;
use tokio_postgres::types::ToSql;
use tokio_postgres::Transaction;

/// Default batch size for INSERT operations.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Bind parameters per generated row.
const PARAMS_PER_ROW: usize = 3;

/// PostgreSQL's wire protocol caps a statement at this many bind parameters.
const MAX_BIND_PARAMS: usize = u16::MAX as usize;

/// Largest batch that fits in a single INSERT statement.
pub const MAX_BATCH_SIZE: usize = MAX_BIND_PARAMS / PARAMS_PER_ROW;

/// Offset added to the row index for the `description` value.
const DESCRIPTION_OFFSET: i64 = 10;

/// Largest row index whose `description` still fits in a `bigint`.
pub const MAX_ROW_INDEX: u64 = (i64::MAX - DESCRIPTION_OFFSET) as u64;

/// One synthetic product row.
///
/// `description` and `quantity` are bound as `bigint` and `double precision`
/// and left to PostgreSQL's assignment casts, so the loader works whether the
/// columns are declared as text, integer or numeric.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub name: String,
    pub description: i64,
    pub quantity: f64,
}

/// Generate the row for index `i`.
///
/// `i` must not exceed [`MAX_ROW_INDEX`]; [`batch_ranges`] enforces this.
pub fn generate_row(i: u64) -> ProductRow {
    ProductRow {
        name: format!("product_{i}"),
        description: DESCRIPTION_OFFSET + i as i64,
        quantity: 1.99 + i as f64,
    }
}

/// Split `[start, start + count)` into consecutive ranges of at most `batch_size`.
pub fn batch_ranges(
    start: u64,
    count: u64,
    batch_size: usize,
) -> Result<impl Iterator<Item = Range<u64>>, PostgreSQLPopulatorError> {
    validate_batch_size(batch_size)?;
    let end = start.checked_add(count).ok_or_else(|| {
        PostgreSQLPopulatorError::Config(format!(
            "row range overflows: start {start} + count {count}"
        ))
    })?;
    if count > 0 && end - 1 > MAX_ROW_INDEX {
        return Err(PostgreSQLPopulatorError::Config(format!(
            "row indexes up to {} exceed the maximum of {MAX_ROW_INDEX}",
            end - 1
        )));
    }
    let step = batch_size as u64;

    Ok((start..end)
        .step_by(batch_size)
        .map(move |s| s..std::cmp::min(s.saturating_add(step), end)))
}

/// Check a batch size is usable for a single INSERT statement.
pub fn validate_batch_size(batch_size: usize) -> Result<(), PostgreSQLPopulatorError> {
    if batch_size == 0 {
        return Err(PostgreSQLPopulatorError::Config(
            "batch size must be greater than zero".to_string(),
        ));
    }
    if batch_size > MAX_BATCH_SIZE {
        return Err(PostgreSQLPopulatorError::Config(format!(
            "batch size {batch_size} exceeds the maximum of {MAX_BATCH_SIZE} rows per statement"
        )));
    }
    Ok(())
}

/// Build a multi-row INSERT for `row_count` rows into an already-quoted table.
pub fn build_insert_sql(quoted_table: &str, row_count: usize) -> String {
    let placeholders: Vec<String> = (0..row_count)
        .map(|r| {
            let base = r * PARAMS_PER_ROW;
            format!(
                "(${}, ${}::bigint, ${}::double precision)",
                base + 1,
                base + 2,
                base + 3
            )
        })
        .collect();

    format!(
        "INSERT INTO {quoted_table} (name, description, quantity) VALUES {}",
        placeholders.join(", ")
    )
}

/// Insert a batch of rows within the given transaction.
pub async fn insert_batch(
    tx: &Transaction<'_>,
    quoted_table: &str,
    rows: &[ProductRow],
) -> Result<u64, PostgreSQLPopulatorError> {
    if rows.is_empty() {
        return Ok(0);
    }

    let sql = build_insert_sql(quoted_table, rows.len());

    let mut params: Vec<&(dyn ToSql + Sync)> = Vec::with_capacity(rows.len() * PARAMS_PER_ROW);
    for row in rows {
        params.push(&row.name);
        params.push(&row.description);
        params.push(&row.quantity);
    }

    let inserted = tx.execute(sql.as_str(), &params).await?;
    Ok(inserted)
}

/// Generate CREATE TABLE statement for the product table.
pub fn generate_create_table(quoted_table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {quoted_table} (\
         id SERIAL PRIMARY KEY, \
         name VARCHAR(255) NOT NULL, \
         description VARCHAR(512), \
         quantity INTEGER)"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_row() {
        let row = generate_row(0);
        assert_eq!(row.name, "product_0");
        assert_eq!(row.description, 10);
        assert!((row.quantity - 1.99).abs() < f64::EPSILON);

        let row = generate_row(42);
        assert_eq!(row.name, "product_42");
        assert_eq!(row.description, 52);
        assert!((row.quantity - 43.99).abs() < 1e-9);
    }

    #[test]
    fn test_batch_ranges_exact() {
        let ranges: Vec<_> = batch_ranges(0, 3000, 1000).unwrap().collect();
        assert_eq!(ranges, vec![0..1000, 1000..2000, 2000..3000]);
    }

    #[test]
    fn test_batch_ranges_partial_tail() {
        let ranges: Vec<_> = batch_ranges(0, 2500, 1000).unwrap().collect();
        assert_eq!(ranges, vec![0..1000, 1000..2000, 2000..2500]);
    }

    #[test]
    fn test_batch_ranges_offset_start() {
        let ranges: Vec<_> = batch_ranges(100, 250, 100).unwrap().collect();
        assert_eq!(ranges, vec![100..200, 200..300, 300..350]);
    }

    #[test]
    fn test_batch_ranges_empty() {
        assert_eq!(batch_ranges(0, 0, 1000).unwrap().count(), 0);
    }

    #[test]
    fn test_batch_ranges_invalid_batch_size() {
        assert!(batch_ranges(0, 10, 0).is_err());
        assert!(batch_ranges(0, 10, MAX_BATCH_SIZE + 1).is_err());
        assert!(batch_ranges(0, 10, MAX_BATCH_SIZE).is_ok());
    }

    #[test]
    fn test_batch_ranges_overflow() {
        assert!(batch_ranges(u64::MAX, 2, 10).is_err());
    }

    #[test]
    fn test_batch_ranges_rejects_indexes_past_bigint() {
        assert!(batch_ranges(MAX_ROW_INDEX, 1, 10).is_ok());
        assert!(batch_ranges(MAX_ROW_INDEX, 2, 10).is_err());
        assert!(batch_ranges(i64::MAX as u64 - 9, 1, 10).is_err());
        // An empty range never generates a row.
        assert!(batch_ranges(i64::MAX as u64, 0, 10).is_ok());
    }

    #[test]
    fn test_generate_row_at_max_index() {
        assert_eq!(generate_row(MAX_ROW_INDEX).description, i64::MAX);
    }

    #[test]
    fn test_build_insert_sql() {
        let sql = build_insert_sql("\"products\"", 2);
        assert_eq!(
            sql,
            "INSERT INTO \"products\" (name, description, quantity) VALUES \
             ($1, $2::bigint, $3::double precision), ($4, $5::bigint, $6::double precision)"
        );
    }

    #[test]
    fn test_generate_create_table() {
        let sql = generate_create_table("\"products\"");
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS \"products\""));
        assert!(sql.contains("id SERIAL PRIMARY KEY"));
        assert!(sql.contains("quantity INTEGER"));
    }
}
