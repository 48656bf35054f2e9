//! Collector for accumulating violations during validation.
//!
//! The [`ViolationCollector`] lets each validation stage report every
//! problem it finds instead of stopping at the first one.

use crate::error::{ValidationVerdict, Violation};

/// A collector for accumulating violations and advisories.
///
/// # Example
///
/// ```
/// # use umlscribe_markup::{Violation, ViolationCollector};
/// # use umlscribe_core::ViolationCode;
///
/// let mut collector = ViolationCollector::new();
/// collector.emit(Violation::error(ViolationCode::E002, "Missing @startuml directive"));
/// collector.emit(Violation::warning(ViolationCode::W001, "No relationships between classes"));
///
/// let verdict = collector.finish();
/// assert_eq!(verdict.violations().len(), 1);
/// assert_eq!(verdict.advisories().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ViolationCollector {
    violations: Vec<Violation>,
    advisories: Vec<Violation>,
}

impl ViolationCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a violation to this collector.
    ///
    /// Errors are recorded as violations, warnings as advisories.
    pub fn emit(&mut self, violation: Violation) {
        if violation.severity().is_error() {
            self.violations.push(violation);
        } else {
            self.advisories.push(violation);
        }
    }

    /// Returns `true` if any error-severity violation was emitted.
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Finish collection and return the verdict.
    pub fn finish(self) -> ValidationVerdict {
        ValidationVerdict::new(self.violations, self.advisories)
    }
}

#[cfg(test)]
mod tests {
    use umlscribe_core::ViolationCode;

    use super::*;

    #[test]
    fn test_collector_new_finish_valid() {
        let collector = ViolationCollector::new();
        assert!(!collector.has_violations());
        assert!(collector.finish().is_valid());
    }

    #[test]
    fn test_collector_emit_error() {
        let mut collector = ViolationCollector::new();

        collector.emit(Violation::error(ViolationCode::E001, "Empty code provided"));

        assert!(collector.has_violations());
        assert!(!collector.finish().is_valid());
    }

    #[test]
    fn test_collector_emit_warning_stays_valid() {
        let mut collector = ViolationCollector::new();

        collector.emit(Violation::warning(ViolationCode::W002, "No relationships between entities"));

        let verdict = collector.finish();
        assert!(verdict.is_valid());
        assert_eq!(verdict.advisories().len(), 1);
    }

    #[test]
    fn test_collector_preserves_order() {
        let mut collector = ViolationCollector::new();

        collector.emit(Violation::error(ViolationCode::E002, "first"));
        collector.emit(Violation::warning(ViolationCode::W001, "advice"));
        collector.emit(Violation::error(ViolationCode::E003, "second"));

        let verdict = collector.finish();
        assert_eq!(verdict.messages(), vec!["first", "second"]);
    }
}
