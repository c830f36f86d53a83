//! # Contracts
//!
//! Frozen interface contracts shared by every courier crate.
//! All business crates depend on this crate; reverse dependencies are prohibited.
//!
//! ## Pipeline Model
//! - A [`Content`] is submitted to the notification service
//! - The dispatch hub hands it to every registered [`Reactor`]
//! - The dispatch engine reactor forwards the text to every [`DeliveryChannel`]
//!
//! Failures never abort the fan-out; they are collected into
//! [`NotifyReport`] / [`DeliveryReport`].

mod address;
mod blueprint;
mod channel;
mod content;
mod error;
mod reactor;
mod report;

pub use address::{is_valid_email, is_valid_phone};
pub use blueprint::*;
pub use channel::DeliveryChannel;
pub use content::Content;
pub use error::*;
pub use reactor::Reactor;
pub use report::*;
