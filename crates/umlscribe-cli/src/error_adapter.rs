//! Error adapter for converting ScribeError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Violation Support
//!
//! When a [`ScribeError::Validation`] carries several violations, each
//! violation is rendered independently against the checked markup.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use umlscribe::{Dialect, ScribeError, Span, Violation};

/// Adapter for a single grammar violation.
///
/// This adapter wraps a single [`Violation`] and implements
/// [`MietteDiagnostic`] to enable rich error formatting in the CLI.
pub struct ViolationAdapter<'a> {
    /// The wrapped violation
    violation: &'a Violation,
    /// Markup the violation was found in
    src: &'a str,
}

impl<'a> ViolationAdapter<'a> {
    /// Create a new violation adapter.
    pub fn new(violation: &'a Violation, src: &'a str) -> Self {
        Self { violation, src }
    }
}

impl fmt::Debug for ViolationAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViolationAdapter")
            .field("violation", &self.violation)
            .finish()
    }
}

impl fmt::Display for ViolationAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.violation.message())
    }
}

impl std::error::Error for ViolationAdapter<'_> {}

impl MietteDiagnostic for ViolationAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.violation.code()))
    }

    fn severity(&self) -> Option<miette::Severity> {
        if self.violation.severity().is_warning() {
            Some(miette::Severity::Warning)
        } else {
            Some(miette::Severity::Error)
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.violation
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = self.violation.label()?;
        let span = span_to_miette(label.span());
        let message = Some(label.message().to_string());
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(message, span),
        )))
    }
}

/// Adapter for non-validation [`ScribeError`] variants.
///
/// This adapter handles errors that don't have source locations, such as
/// I/O errors, configuration errors and generation failures.
pub struct ErrorAdapter<'a>(pub &'a ScribeError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ScribeError::Io(_) => "umlscribe::io",
            ScribeError::Config(_) => "umlscribe::config",
            ScribeError::UnknownDialect(_) => "umlscribe::dialect",
            ScribeError::Validation { .. } => return None,
            ScribeError::Generation(_) => "umlscribe::generation",
            ScribeError::Artifact(_) => "umlscribe::artifact",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            ScribeError::UnknownDialect(_) => {
                let slugs: Vec<&str> = Dialect::ALL.iter().map(|d| d.slug()).collect();
                Some(Box::new(format!("expected one of: {}", slugs.join(", "))))
            }
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either a single violation or a non-validation error,
/// providing a uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A grammar violation with source location information.
    Violation(ViolationAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Violation(v) => fmt::Display::fmt(v, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Violation(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Violation(v) => v.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Reportable::Violation(v) => v.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Violation(v) => v.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Violation(v) => v.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Violation(v) => v.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a markup [`Span`] to a miette [`SourceSpan`].
fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert a [`ScribeError`] into a list of reportable errors.
///
/// For [`ScribeError::Validation`], this returns one [`Reportable`] for
/// each violation in the verdict. For other error variants, this returns a
/// single [`Reportable`].
pub fn to_reportables(err: &ScribeError) -> Vec<Reportable<'_>> {
    match err {
        ScribeError::Validation { verdict, src } => verdict
            .violations()
            .iter()
            .map(|v| Reportable::Violation(ViolationAdapter::new(v, src)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// Process exit status for a failed command.
///
/// | status | meaning |
/// |--------|---------|
/// | 1 | I/O failure |
/// | 2 | bad configuration or unknown dialect |
/// | 3 | markup failed validation |
/// | 4 | model call or code artifact failed |
pub fn exit_status(err: &ScribeError) -> u8 {
    match err {
        ScribeError::Io(_) => 1,
        ScribeError::Config(_) | ScribeError::UnknownDialect(_) => 2,
        ScribeError::Validation { .. } => 3,
        ScribeError::Generation(_) | ScribeError::Artifact(_) => 4,
    }
}
