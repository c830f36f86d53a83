//! DecorationChain - ordered decoration steps applied to a base content

use contracts::{Content, Decoration};

use crate::{HeaderDecorator, SignatureDecorator, TextContent, TimestampDecorator};

/// Ordered list of decorations.
///
/// Steps wrap in list order, so the last step is the outermost wrapper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecorationChain {
    steps: Vec<Decoration>,
}

impl DecorationChain {
    /// Empty chain (identity)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: append a header step
    pub fn header(mut self, text: impl Into<String>) -> Self {
        self.steps.push(Decoration::Header { text: text.into() });
        self
    }

    /// Builder: append a signature step
    pub fn signature(mut self, signer: impl Into<String>) -> Self {
        self.steps.push(Decoration::Signature {
            signer: signer.into(),
        });
        self
    }

    /// Builder: append a timestamp step
    pub fn timestamp(mut self) -> Self {
        self.steps.push(Decoration::Timestamp);
        self
    }

    pub fn steps(&self) -> &[Decoration] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// True when reading the result of `apply` depends on wall-clock time
    pub fn is_time_dependent(&self) -> bool {
        self.steps.iter().any(|s| matches!(s, Decoration::Timestamp))
    }

    /// Wrap `base` with every step, in order
    pub fn apply(&self, base: Box<dyn Content>) -> Box<dyn Content> {
        self.steps
            .iter()
            .fold(base, |inner, step| -> Box<dyn Content> {
                match step {
                    Decoration::Header { text } => Box::new(HeaderDecorator::new(inner, text)),
                    Decoration::Signature { signer } => {
                        Box::new(SignatureDecorator::new(inner, signer))
                    }
                    Decoration::Timestamp => Box::new(TimestampDecorator::new(inner)),
                }
            })
    }

    /// Decorate a plain text leaf
    pub fn compose(&self, text: impl Into<String>) -> Box<dyn Content> {
        self.apply(Box::new(TextContent::new(text)))
    }
}

impl From<Vec<Decoration>> for DecorationChain {
    fn from(steps: Vec<Decoration>) -> Self {
        Self { steps }
    }
}

impl FromIterator<Decoration> for DecorationChain {
    fn from_iter<I: IntoIterator<Item = Decoration>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}
