//! Layered error definitions
//!
//! Categorized by source: config / delivery / reactor

use thiserror::Error;

use crate::DeliveryFailure;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Delivery Errors =====
    /// A single channel could not deliver
    #[error("channel '{channel}' delivery error: {message}")]
    Delivery { channel: String, message: String },

    /// Some channels of a fan-out failed, the rest were still attempted
    #[error("{} of {total} channel deliveries failed", failures.len())]
    PartialDelivery {
        total: usize,
        failures: Vec<DeliveryFailure>,
    },

    // ===== Reactor Errors =====
    /// Reactor update error
    #[error("reactor '{reactor}' update error: {message}")]
    Reactor { reactor: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create channel delivery error
    pub fn delivery(channel: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Delivery {
            channel: channel.into(),
            message: message.into(),
        }
    }

    /// Create reactor update error
    pub fn reactor(reactor: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Reactor {
            reactor: reactor.into(),
            message: message.into(),
        }
    }
}
