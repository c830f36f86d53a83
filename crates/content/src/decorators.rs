//! Decorators - wrap one inner content and annotate its text
//!
//! Each decorator takes ownership of the content it wraps, so a content graph
//! is always a simple chain.

use chrono::{DateTime, SecondsFormat, Utc};
use contracts::Content;

/// Separator between an annotation and the wrapped text
pub const SEPARATOR: &str = " :: ";

/// Appends ` :: signed_by: <signer>`
pub struct SignatureDecorator {
    inner: Box<dyn Content>,
    signer: String,
}

impl SignatureDecorator {
    pub fn new(inner: Box<dyn Content>, signer: impl Into<String>) -> Self {
        Self {
            inner,
            signer: signer.into(),
        }
    }

    pub fn signer(&self) -> &str {
        &self.signer
    }
}

impl Content for SignatureDecorator {
    fn read(&self) -> String {
        format!("{}{SEPARATOR}signed_by: {}", self.inner.read(), self.signer)
    }
}

/// Prefixes `[<header>] `
pub struct HeaderDecorator {
    inner: Box<dyn Content>,
    header: String,
}

impl HeaderDecorator {
    pub fn new(inner: Box<dyn Content>, header: impl Into<String>) -> Self {
        Self {
            inner,
            header: header.into(),
        }
    }
}

impl Content for HeaderDecorator {
    fn read(&self) -> String {
        format!("[{}] {}", self.header, self.inner.read())
    }
}

/// Prefixes the current UTC time.
///
/// The only non-deterministic decorator: the clock is sampled on every
/// `read`, never at construction.
pub struct TimestampDecorator {
    inner: Box<dyn Content>,
    clock: fn() -> DateTime<Utc>,
}

impl TimestampDecorator {
    pub fn new(inner: Box<dyn Content>) -> Self {
        Self::with_clock(inner, Utc::now)
    }

    /// Use a custom clock (tests pin time with this)
    pub fn with_clock(inner: Box<dyn Content>, clock: fn() -> DateTime<Utc>) -> Self {
        Self { inner, clock }
    }
}

impl Content for TimestampDecorator {
    fn read(&self) -> String {
        let now = (self.clock)().to_rfc3339_opts(SecondsFormat::Millis, true);
        format!("{now}{SEPARATOR}{}", self.inner.read())
    }
}

/// Builder-style decoration for any owned content
pub trait ContentExt: Content + Sized + 'static {
    /// Wrap with a signature suffix
    fn signed_by(self, signer: impl Into<String>) -> SignatureDecorator {
        SignatureDecorator::new(Box::new(self), signer)
    }

    /// Wrap with a header prefix
    fn with_header(self, header: impl Into<String>) -> HeaderDecorator {
        HeaderDecorator::new(Box::new(self), header)
    }

    /// Wrap with a timestamp prefix
    fn timestamped(self) -> TimestampDecorator {
        TimestampDecorator::new(Box::new(self))
    }
}

impl<C: Content + 'static> ContentExt for C {}
