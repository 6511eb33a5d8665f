//! DML lifecycle integration test.

use crate::{connection_string, drop_table, test_table};
use loadtest_lifecycle::{create_table, run_phase, LifecycleConfig, Phase};

async fn count_rows(table: &str, filter: &str) -> Result<i64, Box<dyn std::error::Error>> {
    let client = loadtest_connection::connect(&connection_string()).await?;
    let row = client
        .query_one(
            format!("SELECT COUNT(*) FROM \"public\".\"{table}\" WHERE {filter}").as_str(),
            &[],
        )
        .await?;
    Ok(row.get(0))
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_full_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("loadtest_lifecycle=info")
        .try_init()
        .ok();

    let table = test_table("lifecycle_loadtest");
    let mut config = LifecycleConfig::new(&table);
    config.processes = 3;
    config.total_rows = 1000;
    config.batch_size = 64;
    let conn_str = connection_string();

    create_table(&conn_str, &config).await?;

    let insert = run_phase(Phase::Insert, &conn_str, &config).await?;
    assert_eq!(insert.rows_affected, 1000);
    assert_eq!(insert.workers.len(), 3);
    assert_eq!(count_rows(&table, "payload LIKE 'Payload for row %'").await?, 1000);

    let update = run_phase(Phase::Update, &conn_str, &config).await?;
    assert_eq!(update.rows_affected, 1000);
    assert_eq!(count_rows(&table, "payload LIKE 'Updated payload at %'").await?, 1000);

    let delete = run_phase(Phase::Delete, &conn_str, &config).await?;
    assert_eq!(delete.rows_affected, 1000);
    assert_eq!(count_rows(&table, "TRUE").await?, 0);

    drop_table(&table).await;
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL"]
async fn test_insert_conflict_fails_phase() -> Result<(), Box<dyn std::error::Error>> {
    let table = test_table("lifecycle_conflict");
    let mut config = LifecycleConfig::new(&table);
    config.processes = 2;
    config.total_rows = 20;
    config.batch_size = 5;
    let conn_str = connection_string();

    create_table(&conn_str, &config).await?;
    run_phase(Phase::Insert, &conn_str, &config).await?;

    // Same range again violates the primary key in every worker.
    let err = run_phase(Phase::Insert, &conn_str, &config).await.unwrap_err();
    assert!(err.to_string().contains("2 of 2 workers"));

    // Each worker rolled back, so the table still holds exactly the first run.
    assert_eq!(count_rows(&table, "TRUE").await?, 20);

    drop_table(&table).await;
    Ok(())
}
