//! Severity levels for violations.
//!
//! Errors make markup invalid. Warnings are advisories: they describe
//! markup that validates but could be better.

use std::fmt;

use serde::Serialize;

/// The severity level of a violation.
///
/// - [`Severity::Error`] makes the markup invalid
/// - [`Severity::Warning`] is advisory and never affects validity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The markup breaks a grammar rule and will not render.
    Error,

    /// The markup is valid but misses something worth adding.
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
