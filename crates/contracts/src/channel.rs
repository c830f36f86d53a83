//! DeliveryChannel trait - Dispatch engine output interface
//!
//! Defines the abstract interface for delivery channels.

use crate::ContractError;

/// Text delivery trait
///
/// All channel implementations must implement this trait.
pub trait DeliveryChannel: Send {
    /// Channel name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Destination identifier (address, phone number), `None` for broadcast channels
    fn destination(&self) -> Option<&str>;

    /// Deliver final notification text
    ///
    /// # Errors
    /// Returns a channel-local delivery error; it is never fatal to the fan-out.
    fn deliver(&mut self, text: &str) -> Result<(), ContractError>;
}

impl<C: DeliveryChannel + ?Sized> DeliveryChannel for Box<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn destination(&self) -> Option<&str> {
        (**self).destination()
    }

    fn deliver(&mut self, text: &str) -> Result<(), ContractError> {
        (**self).deliver(text)
    }
}
