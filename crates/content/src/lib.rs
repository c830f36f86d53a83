//! # Content
//!
//! Notification content and its decoration chain.
//!
//! Responsibilities:
//! - Leaf text content
//! - Pure decorators that wrap exactly one inner content
//! - Ordered decoration chains built from configuration
//!
//! # Example
//!
//! ```
//! use content::{ContentExt, TextContent};
//! use contracts::Content;
//!
//! let note = TextContent::new("Hello").signed_by("X");
//! assert_eq!(note.read(), "Hello :: signed_by: X");
//! ```

mod chain;
mod decorators;
mod text;

pub use chain::DecorationChain;
pub use contracts::{Content, Decoration};
pub use decorators::{
    ContentExt, HeaderDecorator, SignatureDecorator, TimestampDecorator, SEPARATOR,
};
pub use text::TextContent;
