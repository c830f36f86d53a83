//! Pipeline orchestrator - feeds input lines into the notification service.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use notification_service::NotificationService;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use super::PipelineStats;

/// Pipeline configuration
pub struct PipelineConfig {
    /// The service every line is submitted to
    pub service: Arc<NotificationService>,

    /// Maximum number of messages to submit (None = unlimited)
    pub max_messages: Option<u64>,
}

/// Line-driven submission loop
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run against stdin until EOF, the message limit, or `shutdown`
    pub async fn run(self, shutdown: impl Future<Output = ()>) -> Result<PipelineStats> {
        self.run_with_input(BufReader::new(tokio::io::stdin()), shutdown)
            .await
    }

    /// Run against any line source
    pub async fn run_with_input<R>(
        self,
        input: R,
        shutdown: impl Future<Output = ()>,
    ) -> Result<PipelineStats>
    where
        R: AsyncBufRead + Unpin,
    {
        let start_time = Instant::now();
        let service = self.config.service;
        let mut stats = PipelineStats::default();
        let mut lines = input.lines();
        tokio::pin!(shutdown);

        loop {
            let line = tokio::select! {
                line = lines.next_line() => line.context("Failed to read input")?,
                _ = &mut shutdown => {
                    warn!("Received shutdown signal, stopping pipeline...");
                    break;
                }
            };

            let Some(line) = line else {
                debug!("Input closed");
                break;
            };
            stats.lines_read += 1;

            let text = line.trim().to_string();
            if text.is_empty() {
                stats.lines_skipped += 1;
                continue;
            }

            // Channels may block on I/O
            let svc = Arc::clone(&service);
            let (report, elapsed) = tokio::task::spawn_blocking(move || {
                let started = Instant::now();
                let report = svc.send(text);
                (report, started.elapsed())
            })
            .await
            .context("Submission task failed")?;

            stats.submitted += 1;
            stats.dispatch_metrics.update(
                &report.notify,
                report.delivery.as_ref(),
                elapsed.as_secs_f64() * 1000.0,
            );

            if let Some(max) = self.config.max_messages {
                if stats.submitted >= max {
                    info!(messages = stats.submitted, "Reached max messages limit");
                    break;
                }
            }
        }

        stats.history_len = service.history_len();
        stats.duration = start_time.elapsed();
        Ok(stats)
    }
}
