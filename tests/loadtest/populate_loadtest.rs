//! Batch loader integration test.

use crate::{connection_string, drop_table, test_table};
use loadtest_populate_postgresql::PostgreSQLPopulator;

const ROW_COUNT: u64 = 250;
const BATCH_SIZE: usize = 100;

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_populate_commits_every_batch() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("loadtest_populate_postgresql=debug")
        .try_init()
        .ok();

    let table = test_table("products_loadtest");
    let mut populator = PostgreSQLPopulator::new(&connection_string(), &table)
        .await?
        .with_batch_size(BATCH_SIZE);
    populator.create_table().await?;

    let metrics = populator.populate(ROW_COUNT).await?;
    assert_eq!(metrics.rows_inserted, ROW_COUNT);
    assert_eq!(metrics.batch_count, 3);
    assert_eq!(populator.row_count().await?, ROW_COUNT);
    assert_eq!(populator.current_index(), ROW_COUNT);

    // A second run continues the generated sequence.
    populator.populate(10).await?;
    assert_eq!(populator.row_count().await?, ROW_COUNT + 10);

    let client = loadtest_connection::connect(&connection_string()).await?;
    let row = client
        .query_one(
            format!("SELECT name, description, quantity FROM \"{table}\" WHERE name = 'product_7'")
                .as_str(),
            &[],
        )
        .await?;
    let description: String = row.get(1);
    let quantity: i32 = row.get(2);
    assert_eq!(description, "17");
    assert_eq!(quantity, 9);

    drop_table(&table).await;
    Ok(())
}
