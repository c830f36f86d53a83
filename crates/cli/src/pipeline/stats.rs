//! Pipeline statistics and metrics.

use std::time::Duration;

use observability::DispatchMetricsAggregator;

/// Statistics from a pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Lines read from input
    pub lines_read: u64,

    /// Blank lines ignored
    pub lines_skipped: u64,

    /// Messages submitted to the service
    pub submitted: u64,

    /// Service history length at the end of the run
    pub history_len: usize,

    /// Total duration of the run
    pub duration: Duration,

    /// Fan-out metrics aggregator
    pub dispatch_metrics: DispatchMetricsAggregator,
}

impl PipelineStats {
    /// Submissions per second
    pub fn rate(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.submitted as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                    Pipeline Statistics                       ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("📊 Overview");
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Lines read: {}", self.lines_read);
        println!("   ├─ Blank lines skipped: {}", self.lines_skipped);
        println!("   ├─ Messages submitted: {}", self.submitted);
        println!("   ├─ Rate: {:.2}/s", self.rate());
        println!("   └─ History entries: {}", self.history_len);

        let summary = self.dispatch_metrics.summary();

        println!("\n📈 Dispatch Metrics");
        println!(
            "   ├─ Clean submissions: {} / {}",
            summary.clean_submissions, summary.total_submissions
        );
        println!("   ├─ Deliveries: {}", summary.total_delivered);
        println!(
            "   ├─ Failed deliveries: {} ({:.2}%)",
            summary.total_delivery_failures, summary.delivery_failure_rate
        );
        println!("   └─ Submit latency (ms): {}", summary.fanout_ms);

        if !summary.reactor_failures.is_empty() {
            println!("\n⚠️  Reactor Failures");
            for (reactor, count) in &summary.reactor_failures {
                println!("   ├─ {}: {}", reactor, count);
            }
        }
        if !summary.channel_failures.is_empty() {
            println!("\n⚠️  Channel Failures");
            for (channel, count) in &summary.channel_failures {
                println!("   ├─ {}: {}", channel, count);
            }
        }

        println!();
    }
}
