//! In-process maintenance scheduler.
//!
//! Spawns one interval loop per job. The jobs themselves are idempotent
//! and tolerate overlapping runs, so a slow tick racing the next one (or
//! a cron endpoint firing at the same moment) is harmless.

use std::time::Duration;

use chrono::Utc;
use lectureboard_common::SchedulerConfig;
use lectureboard_core::MaintenanceService;
use tokio::time::interval;

/// Spawn the auto-end and auto-summarize loops.
pub fn spawn(config: &SchedulerConfig, maintenance: MaintenanceService) {
    let auto_end_interval = Duration::from_secs(config.auto_end_interval_seconds);
    let auto_summarize_interval = Duration::from_secs(config.auto_summarize_interval_seconds);

    let auto_end_service = maintenance.clone();
    tokio::spawn(async move {
        let mut interval = interval(auto_end_interval);
        loop {
            interval.tick().await;
            match auto_end_service.run_auto_end(Utc::now()).await {
                Ok(report) => {
                    if report.processed_count > 0 {
                        tracing::info!(
                            processed = report.processed_count,
                            "Auto-end run completed"
                        );
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Auto-end run failed");
                }
            }
        }
    });

    tokio::spawn(async move {
        let mut interval = interval(auto_summarize_interval);
        loop {
            interval.tick().await;
            match maintenance.run_auto_summarize(Utc::now()).await {
                Ok(report) => {
                    if report.processed_count > 0 {
                        tracing::info!(
                            processed = report.processed_count,
                            succeeded = report.success_count,
                            failed = report.error_count,
                            "Auto-summarize run completed"
                        );
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Auto-summarize run failed");
                }
            }
        }
    });
}
