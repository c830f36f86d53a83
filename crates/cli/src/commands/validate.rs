//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::{ChannelType, ServiceBlueprint};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;
use crate::commands::load_blueprint;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    service: String,
    decoration_count: usize,
    logger_enabled: bool,
    channel_count: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    match load_blueprint(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);
            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    version: format!("{:?}", blueprint.version),
                    service: blueprint.service.name.clone(),
                    decoration_count: blueprint.decorations.len(),
                    logger_enabled: blueprint.logger.enabled,
                    channel_count: blueprint.channels.len(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &ServiceBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    if blueprint.channels.is_empty() {
        warnings.push("No channels configured - messages are only logged".to_string());
        if !blueprint.logger.enabled {
            warnings.push("Logger disabled and no channels - nothing observes submissions".to_string());
        }
    }

    // Identical type and destination means the same recipient gets the message twice
    for (i, channel) in blueprint.channels.iter().enumerate() {
        if channel.channel_type == ChannelType::Popup {
            continue;
        }
        let duplicate = blueprint.channels[..i]
            .iter()
            .any(|c| c.channel_type == channel.channel_type && c.params == channel.params);
        if duplicate {
            warnings.push(format!(
                "Channel '{}' repeats an earlier {} destination",
                channel.name,
                channel.channel_type.as_str()
            ));
        }
    }

    let timestamps = blueprint
        .decorations
        .iter()
        .filter(|d| matches!(d, contracts::Decoration::Timestamp))
        .count();
    if timestamps > 1 {
        warnings.push(format!("{timestamps} timestamp decorations configured"));
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Service: {}", summary.service);
            println!("  Decorations: {}", summary.decoration_count);
            println!("  Logger: {}", if summary.logger_enabled { "on" } else { "off" });
            println!("  Channels: {}", summary.channel_count);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
