//! Reactor trait - Dispatch hub listener interface

use crate::{Content, ContractError};

/// A unit driven by hub updates.
///
/// Reactors are registered with the hub as `Arc<dyn Reactor>`; identity is the
/// identity of that allocation, not of the name.
pub trait Reactor: Send + Sync {
    /// Reactor name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Called once per hub notification with the hub's current content
    ///
    /// # Errors
    /// Returns the reactor's failure; the hub records it and keeps notifying
    /// the remaining reactors.
    fn on_update(&self, content: &dyn Content) -> Result<(), ContractError>;
}
