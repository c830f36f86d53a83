//! `run` command implementation.

use std::sync::Arc;

use anyhow::Result;
use notification_service::NotificationService;
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::commands::load_blueprint;
use crate::error::CliError;
use crate::pipeline::{Pipeline, PipelineConfig};

/// Execute the `run` command
pub async fn run_pipeline(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    let blueprint = load_blueprint(&args.config)?;

    info!(
        service = %blueprint.service.name,
        decorations = blueprint.decorations.len(),
        logger = blueprint.logger.enabled,
        channels = blueprint.channels.len(),
        "Configuration loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_config_summary(&blueprint);
        return Ok(());
    }

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
    }

    let service = Arc::new(NotificationService::from_blueprint(&blueprint).map_err(CliError::from)?);

    let pipeline = Pipeline::new(PipelineConfig {
        service,
        max_messages: (args.max_messages != 0).then_some(args.max_messages),
    });

    info!("Reading messages from stdin...");
    let stats = pipeline.run(setup_shutdown_signal()).await?;

    info!(
        submitted = stats.submitted,
        history = stats.history_len,
        duration_secs = stats.duration.as_secs_f64(),
        rate = format!("{:.2}", stats.rate()),
        "Run completed"
    );
    stats.print_summary();

    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print configuration summary for dry-run mode
fn print_config_summary(blueprint: &contracts::ServiceBlueprint) {
    println!("\n=== Configuration Summary ===\n");
    println!("Service: {}", blueprint.service.name);

    if !blueprint.decorations.is_empty() {
        println!("\nDecorations ({}):", blueprint.decorations.len());
        for decoration in &blueprint.decorations {
            println!("  - {:?}", decoration);
        }
    }

    if blueprint.logger.enabled {
        println!("\nLogger: {}", blueprint.logger.name);
    }

    if !blueprint.channels.is_empty() {
        println!("\nChannels ({}):", blueprint.channels.len());
        for channel in &blueprint.channels {
            println!("  - {} ({})", channel.name, channel.channel_type.as_str());
        }
    }

    println!();
}
