//! The core violation type of the validation system.
//!
//! A [`Violation`] describes one grammar problem: a code, a severity, a
//! message, an optional labeled span and optional help text.

use std::fmt;

use serde::Serialize;
use umlscribe_core::{ViolationClass, ViolationCode};

use crate::{
    error::{Label, Severity},
    span::Span,
};

/// A grammar violation with source location information.
///
/// # Example
///
/// ```text
/// error[E004]: Unmatched {} brackets: 2 opening, 1 closing
///   --> diagram.puml:3:13
///    |
///  3 | class Order {
///    |             ^ unclosed bracket
///    |
///    = help: close every `{` with a matching `}`
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    code: ViolationCode,
    severity: Severity,
    message: String,
    label: Option<Label>,
    help: Option<String>,
}

impl Violation {
    /// Create an error-severity violation.
    ///
    /// # Example
    ///
    /// ```
    /// # use umlscribe_markup::{Span, Violation};
    /// # use umlscribe_core::ViolationCode;
    ///
    /// let violation = Violation::error(ViolationCode::E101, "Use <|-- for inheritance, not --|>")
    ///     .with_label(Span::new(4..8), "legacy arrow")
    ///     .with_help("write `Parent <|-- Child`");
    /// assert!(violation.severity().is_error());
    /// ```
    pub fn error(code: ViolationCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    /// Create a warning-severity violation (an advisory).
    pub fn warning(code: ViolationCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    /// Get the violation code.
    pub fn code(&self) -> ViolationCode {
        self.code
    }

    /// Get the class of rule that produced this violation.
    pub fn class(&self) -> ViolationClass {
        self.code.class()
    }

    /// Get the severity.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the label, if any.
    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    /// Get the span of the offending markup, if known.
    pub fn span(&self) -> Option<Span> {
        self.label.as_ref().map(Label::span)
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Attach a labeled span.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.label = Some(Label::new(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            label: None,
            help: None,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E001]: message"
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

impl std::error::Error for Violation {}
