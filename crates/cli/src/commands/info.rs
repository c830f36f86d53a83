//! `info` command implementation.

use std::collections::HashMap;

use anyhow::{Context, Result};
use contracts::{Decoration, ServiceBlueprint};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;
use crate::commands::load_blueprint;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    service: String,
    decorations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    logger: Option<String>,
    channels: Vec<ChannelInfo>,
}

#[derive(Serialize)]
struct ChannelInfo {
    name: String,
    channel_type: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    params: HashMap<String, String>,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    let blueprint = load_blueprint(&args.config)?;

    if args.json {
        let info = build_config_info(&blueprint, args);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&blueprint, args);
    }

    Ok(())
}

fn describe(decoration: &Decoration) -> String {
    match decoration {
        Decoration::Header { text } => format!("header [{text}]"),
        Decoration::Signature { signer } => format!("signature by {signer}"),
        Decoration::Timestamp => "timestamp".to_string(),
    }
}

fn build_config_info(blueprint: &ServiceBlueprint, args: &InfoArgs) -> ConfigInfo {
    let channels = blueprint
        .channels
        .iter()
        .map(|c| ChannelInfo {
            name: c.name.clone(),
            channel_type: c.channel_type.as_str().to_string(),
            params: if args.channels {
                c.params.clone()
            } else {
                HashMap::new()
            },
        })
        .collect();

    ConfigInfo {
        version: format!("{:?}", blueprint.version),
        service: blueprint.service.name.clone(),
        decorations: blueprint.decorations.iter().map(describe).collect(),
        logger: blueprint
            .logger
            .enabled
            .then(|| blueprint.logger.name.clone()),
        channels,
    }
}

fn print_config_info(blueprint: &ServiceBlueprint, args: &InfoArgs) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Courier Configuration                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("📍 Service");
    println!("   ├─ Version: {:?}", blueprint.version);
    println!("   ├─ Name: {}", blueprint.service.name);
    if blueprint.logger.enabled {
        println!("   └─ Logger: {}", blueprint.logger.name);
    } else {
        println!("   └─ Logger: disabled");
    }

    println!("\n🖋  Decorations ({})", blueprint.decorations.len());
    for (i, decoration) in blueprint.decorations.iter().enumerate() {
        let prefix = if i == blueprint.decorations.len() - 1 {
            "└─"
        } else {
            "├─"
        };
        println!("   {} {}", prefix, describe(decoration));
    }

    println!("\n📤 Channels ({})", blueprint.channels.len());
    for (i, channel) in blueprint.channels.iter().enumerate() {
        let is_last = i == blueprint.channels.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };
        let child_prefix = if is_last { "   " } else { "│  " };

        println!(
            "   {} {} ({})",
            prefix,
            channel.name,
            channel.channel_type.as_str()
        );

        if args.channels {
            let mut params: Vec<_> = channel.params.iter().collect();
            params.sort();
            for (key, value) in params {
                println!("   {}  · {} = {}", child_prefix, key, value);
            }
        }
    }

    println!();
}
