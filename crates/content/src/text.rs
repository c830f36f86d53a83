//! TextContent - leaf content holding a fixed payload

use contracts::Content;

/// Plain text returned verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextContent {
    text: String,
}

impl TextContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Borrow the payload without allocating
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Content for TextContent {
    fn read(&self) -> String {
        self.text.clone()
    }
}

impl From<&str> for TextContent {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for TextContent {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}
