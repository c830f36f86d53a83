//! `send` command implementation.

use anyhow::{Context, Result};
use notification_service::{NotificationService, SubmitReport};
use serde::Serialize;
use tracing::info;

use crate::cli::SendArgs;
use crate::commands::load_blueprint;
use crate::error::CliError;

/// Submission output for JSON
#[derive(Serialize)]
struct SendOutput<'a> {
    service: &'a str,
    /// Decorated text as read back from the hub
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(flatten)]
    report: &'a SubmitReport,
}

/// Execute the `send` command
pub fn run_send(args: &SendArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    let blueprint = load_blueprint(&args.config)?;
    let service = NotificationService::from_blueprint(&blueprint).map_err(CliError::from)?;

    let report = service.send(args.message.as_str());
    let output = SendOutput {
        service: service.name(),
        text: service.hub().content(),
        report: &report,
    };

    if args.json {
        let json =
            serde_json::to_string_pretty(&output).context("Failed to serialize send report")?;
        println!("{}", json);
    } else {
        print_report(&output);
    }

    if report.is_clean() {
        Ok(())
    } else {
        Err(CliError::Submission {
            sequence: report.sequence,
            notified: report.notify.notified,
            failed: report.notify.failures.len(),
        }
        .into())
    }
}

fn print_report(output: &SendOutput<'_>) {
    let report = output.report;
    let status = if report.is_clean() { "✓" } else { "✗" };

    println!(
        "{} Submission #{} via {}",
        status, report.sequence, output.service
    );
    if let Some(ref text) = output.text {
        println!("   ├─ Text: {}", text);
    }
    println!("   ├─ Reactors notified: {}", report.notify.notified);
    for failure in &report.notify.failures {
        println!("   │  ✗ {}", failure);
    }

    match &report.delivery {
        Some(delivery) => {
            println!(
                "   └─ Channels: {} delivered, {} failed",
                delivery.delivered.len(),
                delivery.failures.len()
            );
            for failure in &delivery.failures {
                println!("      ✗ {}", failure);
            }
        }
        None => println!("   └─ Channels: none"),
    }
}
