//! Fan-out reports
//!
//! Partial failure is reported, never hidden: every stage returns what it
//! attempted and which parts failed.

use std::fmt;

use serde::Serialize;

/// One channel that could not deliver
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryFailure {
    /// Channel name
    pub channel: String,
    /// Rendered error
    pub message: String,
}

impl DeliveryFailure {
    pub fn new(channel: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for DeliveryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.channel, self.message)
    }
}

/// Result of one dispatch engine fan-out
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryReport {
    /// Channels that received the text, in delivery order
    pub delivered: Vec<String>,
    /// Channels that failed, in delivery order
    pub failures: Vec<DeliveryFailure>,
}

impl DeliveryReport {
    /// Number of channels attempted
    pub fn attempted(&self) -> usize {
        self.delivered.len() + self.failures.len()
    }

    /// True when every channel delivered
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One reactor whose update failed or panicked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactorFailure {
    /// Reactor name
    pub reactor: String,
    /// Rendered error
    pub message: String,
}

impl ReactorFailure {
    pub fn new(reactor: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            reactor: reactor.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ReactorFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.reactor, self.message)
    }
}

/// Result of one hub notification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotifyReport {
    /// Reactors notified, including the failing ones
    pub notified: usize,
    /// Reactors that failed, in notification order
    pub failures: Vec<ReactorFailure>,
}

impl NotifyReport {
    /// True when every reactor succeeded
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
