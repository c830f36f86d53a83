//! ServiceBlueprint - Config Loader output
//!
//! Describes a complete notification service: decorations applied to every
//! composed message, the audit logger and the delivery channel routing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// Channel param key: e-mail address
pub const PARAM_ADDRESS: &str = "address";
/// Channel param key: phone number
pub const PARAM_PHONE: &str = "phone";
/// Channel param key: outbox file path
pub const PARAM_PATH: &str = "path";
/// Texts an audit logger keeps in memory unless configured otherwise
pub const DEFAULT_LOGGER_RETAIN: usize = 1024;

/// Config version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete service blueprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceBlueprint {
    /// Config version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Service settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Decorations applied, in order, to composed messages
    #[serde(default)]
    pub decorations: Vec<Decoration>,

    /// Audit logger reactor
    #[serde(default)]
    pub logger: LoggerConfig,

    /// Delivery channel routing
    #[serde(default)]
    pub channels: Vec<ChannelConfig>,
}

impl ServiceBlueprint {
    /// Blueprint with defaults and the given channels
    pub fn with_channels(channels: Vec<ChannelConfig>) -> Self {
        Self {
            version: ConfigVersion::default(),
            service: ServiceConfig::default(),
            decorations: Vec::new(),
            logger: LoggerConfig::default(),
            channels,
        }
    }
}

/// Service settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServiceConfig {
    /// Service name (used for logging/metrics)
    #[validate(length(min = 1, message = "service name cannot be empty"))]
    #[serde(default = "default_service_name")]
    pub name: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
        }
    }
}

fn default_service_name() -> String {
    "courier".to_string()
}

/// One decoration step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decoration {
    /// `[text] ` prefix
    Header { text: String },
    /// ` :: signed_by: signer` suffix
    Signature { signer: String },
    /// Wall-clock prefix, re-evaluated on every read
    Timestamp,
}

/// Audit logger settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggerConfig {
    /// Attach the logger reactor
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Logger reactor name
    #[validate(length(min = 1, message = "logger name cannot be empty"))]
    #[serde(default = "default_logger_name")]
    pub name: String,

    /// Most recent texts kept in memory; older ones are dropped
    #[validate(range(min = 1, message = "logger retain must be at least 1"))]
    #[serde(default = "default_logger_retain")]
    pub retain: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            name: default_logger_name(),
            retain: DEFAULT_LOGGER_RETAIN,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_logger_name() -> String {
    "audit_log".to_string()
}

fn default_logger_retain() -> usize {
    DEFAULT_LOGGER_RETAIN
}

/// Delivery channel configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChannelConfig {
    /// Channel name
    #[validate(length(min = 1, message = "channel name cannot be empty"))]
    pub name: String,

    /// Channel type
    pub channel_type: ChannelType,

    /// Type-specific params
    #[serde(default)]
    pub params: HashMap<String, String>,
}

impl ChannelConfig {
    /// Build a config with no params
    pub fn new(name: impl Into<String>, channel_type: ChannelType) -> Self {
        Self {
            name: name.into(),
            channel_type,
            params: HashMap::new(),
        }
    }

    /// Builder-style param insertion
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Look up a param
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Channel type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    /// E-mail to `address`
    Email,
    /// SMS to `phone`
    Sms,
    /// Desktop popup (broadcast, no destination)
    Popup,
    /// JSON-lines outbox file at `path`
    Outbox,
}

impl ChannelType {
    /// Lowercase name as written in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Popup => "popup",
            Self::Outbox => "outbox",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decorations_deserialize_tagged() {
        let content = r#"
[[decorations]]
kind = "header"
text = "ALERT"

[[decorations]]
kind = "signature"
signer = "ops"

[[decorations]]
kind = "timestamp"
"#;
        let bp: ServiceBlueprint = toml::from_str(content).unwrap();
        assert_eq!(
            bp.decorations,
            vec![
                Decoration::Header {
                    text: "ALERT".to_string()
                },
                Decoration::Signature {
                    signer: "ops".to_string()
                },
                Decoration::Timestamp,
            ]
        );
        assert_eq!(bp.service.name, "courier");
        assert!(bp.logger.enabled);
        assert!(bp.channels.is_empty());
    }

    #[test]
    fn test_channel_config_json() {
        let json = r#"{ "name": "ops", "channel_type": "email", "params": { "address": "ops@example.com" } }"#;
        let channel: ChannelConfig = serde_json::from_str(json).unwrap();
        assert_eq!(channel.channel_type, ChannelType::Email);
        assert_eq!(channel.param(PARAM_ADDRESS), Some("ops@example.com"));
        assert_eq!(channel.param(PARAM_PHONE), None);
    }

    #[test]
    fn test_logger_config_retain() {
        let logger: LoggerConfig = serde_json::from_str(r#"{ "name": "audit" }"#).unwrap();
        assert_eq!(logger.retain, DEFAULT_LOGGER_RETAIN);

        let logger = LoggerConfig {
            retain: 0,
            ..LoggerConfig::default()
        };
        assert!(logger.validate().is_err());
    }

    #[test]
    fn test_channel_config_validate_empty_name() {
        let channel = ChannelConfig::new("", ChannelType::Popup);
        assert!(channel.validate().is_err());
    }
}
