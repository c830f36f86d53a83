//! SmsChannel - sends notification text to one phone number

use contracts::{is_valid_phone, ContractError, DeliveryChannel, PARAM_PHONE};
use std::collections::HashMap;
use tracing::{info, instrument};

/// Characters per SMS segment (GSM-7)
pub const SMS_SEGMENT_CHARS: usize = 160;

/// Channel that texts every notification to a fixed phone number
pub struct SmsChannel {
    name: String,
    phone: String,
}

impl SmsChannel {
    /// Create a new SmsChannel
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }

    /// Create from params map (for factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, ContractError> {
        let name = name.into();
        let phone = params.get(PARAM_PHONE).ok_or_else(|| {
            ContractError::config_validation(
                format!("channels[{name}].params.{PARAM_PHONE}"),
                "sms channel requires a phone number",
            )
        })?;
        Ok(Self::new(name, phone.as_str()))
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Number of segments the text is split into
    pub fn segments(text: &str) -> usize {
        text.chars().count().div_ceil(SMS_SEGMENT_CHARS).max(1)
    }
}

impl DeliveryChannel for SmsChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn destination(&self) -> Option<&str> {
        Some(&self.phone)
    }

    #[instrument(
        name = "sms_channel_deliver",
        skip(self, text),
        fields(channel = %self.name, to = %self.phone)
    )]
    fn deliver(&mut self, text: &str) -> Result<(), ContractError> {
        if !is_valid_phone(&self.phone) {
            return Err(ContractError::delivery(
                &self.name,
                format!("invalid phone number '{}'", self.phone),
            ));
        }
        info!(
            channel = %self.name,
            to = %self.phone,
            segments = Self::segments(text),
            text = %text,
            "SMS sent"
        );
        Ok(())
    }
}
