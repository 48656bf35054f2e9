//! The outcome of validating a piece of markup.

use std::fmt;

use serde::Serialize;
use umlscribe_core::ViolationClass;

use crate::error::Violation;

/// Violations and advisories found in one piece of markup.
///
/// The markup is valid iff there are no violations. Advisories never affect
/// validity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationVerdict {
    violations: Vec<Violation>,
    advisories: Vec<Violation>,
}

impl ValidationVerdict {
    /// Create a verdict from already separated violations and advisories.
    pub fn new(violations: Vec<Violation>, advisories: Vec<Violation>) -> Self {
        Self {
            violations,
            advisories,
        }
    }

    /// Returns `true` when no violation was found.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Get all violations, in detection order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Get all advisories, in detection order.
    pub fn advisories(&self) -> &[Violation] {
        &self.advisories
    }

    /// Iterate over violations of one class.
    pub fn violations_of(&self, class: ViolationClass) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.class() == class)
    }

    /// Get the violation messages, in detection order.
    pub fn messages(&self) -> Vec<String> {
        self.violations
            .iter()
            .map(|v| v.message().to_string())
            .collect()
    }

    /// Consume the verdict, returning its violations.
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.violations.first() {
            Some(first) => {
                write!(f, "{}", first)?;
                if self.violations.len() > 1 {
                    write!(f, " (+{} more)", self.violations.len() - 1)?;
                }
                Ok(())
            }
            None => write!(f, "valid"),
        }
    }
}

impl std::error::Error for ValidationVerdict {}
