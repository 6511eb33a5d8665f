//! PostgreSQL populator for load testing.

use crate::error::PostgreSQLPopulatorError;
use crate::insert::{
    batch_ranges, generate_create_table, generate_row, insert_batch, validate_batch_size,
    ProductRow, DEFAULT_BATCH_SIZE,
};
use loadtest_connection::quote_ident;
use std::time::{Duration, Instant};
use tokio_postgres::Client;
use tracing::{debug, info};

/// Metrics from a populate operation.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// Number of rows inserted.
    pub rows_inserted: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent generating data.
    pub generation_duration: Duration,
    /// Time spent inserting and committing data.
    pub insert_duration: Duration,
    /// Number of batches committed.
    pub batch_count: u64,
}

impl PopulateMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_inserted as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Inserts generated product rows into one table, one transaction per batch.
pub struct PostgreSQLPopulator {
    client: Client,
    table_name: String,
    quoted_table: String,
    batch_size: usize,
    next_index: u64,
}

impl PostgreSQLPopulator {
    /// Connect and create a populator for `table_name`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut populator = PostgreSQLPopulator::new(
    ///     "host=localhost user=postgres_user password=postgres_password dbname=inventory_db",
    ///     "products",
    /// )
    /// .await?
    /// .with_batch_size(1000);
    /// populator.populate(10_000).await?;
    /// ```
    pub async fn new(
        connection_string: &str,
        table_name: &str,
    ) -> Result<Self, PostgreSQLPopulatorError> {
        let client = loadtest_connection::connect(connection_string).await?;
        Self::with_client(client, table_name)
    }

    /// Create a populator with an existing client.
    pub fn with_client(client: Client, table_name: &str) -> Result<Self, PostgreSQLPopulatorError> {
        Ok(Self {
            client,
            table_name: table_name.to_string(),
            quoted_table: quote_ident(table_name)?,
            batch_size: DEFAULT_BATCH_SIZE,
            next_index: 0,
        })
    }

    /// Set the number of rows per INSERT/COMMIT.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the index of the next generated row.
    pub fn with_start_index(mut self, index: u64) -> Self {
        self.next_index = index;
        self
    }

    /// Index of the next row `populate` will generate.
    pub fn current_index(&self) -> u64 {
        self.next_index
    }

    /// Create the product table if it does not exist.
    pub async fn create_table(&self) -> Result<(), PostgreSQLPopulatorError> {
        let sql = generate_create_table(&self.quoted_table);
        info!("Creating table: {}", self.table_name);
        debug!("DDL: {}", sql);
        self.client.execute(sql.as_str(), &[]).await?;
        Ok(())
    }

    /// Insert `count` rows, committing after every batch.
    ///
    /// Rows committed before a failing batch stay in the table; the generation
    /// index only advances past committed batches.
    pub async fn populate(&mut self, count: u64) -> Result<PopulateMetrics, PostgreSQLPopulatorError> {
        validate_batch_size(self.batch_size)?;

        let start_time = Instant::now();
        let mut metrics = PopulateMetrics::default();

        info!(
            "Populating table '{}' with {} rows (batch size: {}, start index: {})",
            self.table_name, count, self.batch_size, self.next_index
        );

        let mut generation_time = Duration::ZERO;
        let mut insert_time = Duration::ZERO;
        let mut remaining = count;

        for range in batch_ranges(self.next_index, count, self.batch_size)? {
            let gen_start = Instant::now();
            let rows: Vec<ProductRow> = range.clone().map(generate_row).collect();
            generation_time += gen_start.elapsed();

            let insert_start = Instant::now();
            let tx = self.client.transaction().await?;
            let inserted = insert_batch(&tx, &self.quoted_table, &rows).await?;
            tx.commit().await?;
            insert_time += insert_start.elapsed();

            self.next_index = range.end;
            metrics.rows_inserted += inserted;
            metrics.batch_count += 1;
            remaining -= rows.len() as u64;

            debug!(
                "Batch {} committed: {} rows inserted, {} remaining",
                metrics.batch_count, inserted, remaining
            );
        }

        metrics.total_duration = start_time.elapsed();
        metrics.generation_duration = generation_time;
        metrics.insert_duration = insert_time;

        info!(
            "Population complete: {} rows in {:?} ({:.2} rows/sec)",
            metrics.rows_inserted,
            metrics.total_duration,
            metrics.rows_per_second()
        );

        Ok(metrics)
    }

    /// Get the row count for the table.
    pub async fn row_count(&self) -> Result<u64, PostgreSQLPopulatorError> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.quoted_table);
        let row = self.client.query_one(sql.as_str(), &[]).await?;
        let count: i64 = row.get(0);
        Ok(count as u64)
    }
}
