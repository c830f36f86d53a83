//! EmailChannel - sends notification text to one e-mail address

use contracts::{is_valid_email, ContractError, DeliveryChannel, PARAM_ADDRESS};
use std::collections::HashMap;
use tracing::{info, instrument};

/// Channel that e-mails every notification to a fixed address
pub struct EmailChannel {
    name: String,
    address: String,
}

impl EmailChannel {
    /// Create a new EmailChannel
    ///
    /// The address is checked on every delivery, not here, so a bad address
    /// surfaces as a delivery failure.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }

    /// Create from params map (for factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, ContractError> {
        let name = name.into();
        let address = params.get(PARAM_ADDRESS).ok_or_else(|| {
            ContractError::config_validation(
                format!("channels[{name}].params.{PARAM_ADDRESS}"),
                "email channel requires an address",
            )
        })?;
        Ok(Self::new(name, address.as_str()))
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl DeliveryChannel for EmailChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn destination(&self) -> Option<&str> {
        Some(&self.address)
    }

    #[instrument(
        name = "email_channel_deliver",
        skip(self, text),
        fields(channel = %self.name, to = %self.address)
    )]
    fn deliver(&mut self, text: &str) -> Result<(), ContractError> {
        if !is_valid_email(&self.address) {
            return Err(ContractError::delivery(
                &self.name,
                format!("invalid e-mail address '{}'", self.address),
            ));
        }
        info!(channel = %self.name, to = %self.address, text = %text, "E-mail sent");
        Ok(())
    }
}
