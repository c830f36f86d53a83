//! PopupChannel - shows notification text as a desktop popup

use contracts::{ContractError, DeliveryChannel};
use tracing::info;

/// Broadcast-style channel with no destination
pub struct PopupChannel {
    name: String,
}

impl PopupChannel {
    /// Create a new PopupChannel with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl DeliveryChannel for PopupChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn destination(&self) -> Option<&str> {
        None
    }

    fn deliver(&mut self, text: &str) -> Result<(), ContractError> {
        info!(channel = %self.name, text = %text, "Popup shown");
        Ok(())
    }
}
