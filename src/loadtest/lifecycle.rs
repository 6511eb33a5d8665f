//! Lifecycle command runner.

use anyhow::Context;
use loadtest_connection::ConnectionArgs;
use loadtest_lifecycle::{
    create_table, describe_partitioning, partition, run_phase, LifecycleArgs, PhaseReport,
};

/// Run the requested lifecycle phase(s) in order, stopping at the first failure.
pub async fn run_lifecycle(
    connection: &ConnectionArgs,
    args: &LifecycleArgs,
) -> anyhow::Result<Vec<PhaseReport>> {
    let (conn_str, masked) = connection
        .resolve()
        .context("Failed to resolve PostgreSQL connection settings")?;
    let config = args.config();
    let phases = args.phase.phases();
    for phase in &phases {
        config
            .validate(*phase)
            .with_context(|| format!("Invalid configuration for {phase} phase"))?;
    }

    if args.dry_run {
        let assignments = partition(config.total_rows, config.processes, config.start_id)?;
        tracing::info!(
            "[DRY-RUN] Would run {:?} on {} with {} rows, {} processes, batch size {}",
            phases,
            config.qualified_table()?,
            config.total_rows,
            config.processes,
            config.batch_size
        );
        tracing::info!("[DRY-RUN] Connection: {}", masked);
        tracing::info!("[DRY-RUN] {}", describe_partitioning(&assignments));
        return Ok(Vec::new());
    }

    tracing::info!("Connecting to PostgreSQL: {}", masked);
    if args.create_table {
        create_table(&conn_str, &config)
            .await
            .with_context(|| format!("Failed to create table '{}'", config.table))?;
    }

    let mut reports = Vec::with_capacity(phases.len());
    for phase in phases {
        let report = run_phase(phase, &conn_str, &config)
            .await
            .with_context(|| format!("{phase} phase failed for table '{}'", config.table))?;
        tracing::info!("\n{}", report.render_table());
        reports.push(report);

        // Rewrite after every phase so completed phases survive a later failure.
        if let Some(path) = &args.metrics_output {
            write_reports(path, &reports)?;
        }
    }

    Ok(reports)
}

fn write_reports(path: &std::path::Path, reports: &[PhaseReport]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(reports)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write metrics to {path:?}"))?;
    tracing::info!("Metrics written to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadtest_lifecycle::PhaseSelection;

    fn args(phase: PhaseSelection) -> LifecycleArgs {
        LifecycleArgs {
            phase,
            table: "lifecycle_test".to_string(),
            schema: "public".to_string(),
            processes: 4,
            total_rows: 1000,
            batch_size: 100,
            start_id: 0,
            create_table: false,
            metrics_output: None,
            dry_run: true,
        }
    }

    #[tokio::test]
    async fn test_dry_run_does_not_connect() {
        let connection = ConnectionArgs {
            connection_string: Some("host=127.0.0.1 port=1".to_string()),
            ..Default::default()
        };
        let reports = run_lifecycle(&connection, &args(PhaseSelection::All))
            .await
            .unwrap();
        assert!(reports.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_batch_size_rejected_before_connecting() {
        let mut args = args(PhaseSelection::Insert);
        args.batch_size = 0;
        args.dry_run = false;

        let err = run_lifecycle(&ConnectionArgs::default(), &args)
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("batch size must be greater than zero"));
    }

    #[test]
    fn test_write_reports() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.json");
        write_reports(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }
}
