//! Labeled spans for violation reports.

use serde::Serialize;

use crate::span::Span;

/// A message attached to a span of the checked markup.
///
/// ```text
/// error[E101]: Use <|-- for inheritance, not --|>
///   --> diagram.puml:8:6
///    |
///  8 | Dog --|> Animal
///    |     ^^^^ legacy arrow
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    span: Span,
    message: String,
}

impl Label {
    /// Create a new label.
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }

    /// Get the span this label applies to.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }
}
