//! Dispatcher error types

use thiserror::Error;

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// Channel creation error
    #[error("failed to create channel '{name}': {message}")]
    ChannelCreation { name: String, message: String },

    /// Detach of a reactor that is not attached
    #[error("reactor '{name}' is not attached")]
    ReactorNotFound { name: String },
}

impl DispatcherError {
    /// Create a channel creation error
    pub fn channel_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ChannelCreation {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a reactor-not-found error
    pub fn reactor_not_found(name: impl Into<String>) -> Self {
        Self::ReactorNotFound { name: name.into() }
    }
}
