//! Channel implementations
//!
//! Contains EmailChannel, SmsChannel, PopupChannel and OutboxChannel.

mod email;
mod outbox;
mod popup;
mod sms;

pub use self::email::EmailChannel;
pub use self::outbox::{OutboxChannel, OutboxRecord};
pub use self::popup::PopupChannel;
pub use self::sms::SmsChannel;
