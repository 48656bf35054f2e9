use std::fmt;

use serde::Serialize;

use umlscribe_core::Dialect;
use umlscribe_markup::Violation;

/// How a [`GenerationResult`] came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    /// The first model output was valid.
    Generated,
    /// A repair attempt produced valid output.
    Repaired,
    /// The improvement pass produced valid output.
    Improved,
    /// Repairs ran out; the best invalid model output is returned.
    BestEffort,
    /// Repairs ran out; the fallback is returned.
    FallbackExhausted,
    /// A repair did not reduce the violation count; the fallback is returned.
    FallbackStalled,
    /// The generator failed; the fallback is returned.
    FallbackGenerationFailed,
}

impl GenerationStatus {
    pub fn is_fallback(self) -> bool {
        matches!(
            self,
            Self::FallbackExhausted | Self::FallbackStalled | Self::FallbackGenerationFailed
        )
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Repaired => "repaired",
            Self::Improved => "improved",
            Self::BestEffort => "best_effort",
            Self::FallbackExhausted => "fallback_exhausted",
            Self::FallbackStalled => "fallback_stalled",
            Self::FallbackGenerationFailed => "fallback_generation_failed",
        }
    }
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of one generation request.
///
/// `violations` always describes the returned `code`, so it is empty whenever
/// `is_valid` is true. `unresolved_violations` keeps the last violations of
/// model output that could not be repaired, even when the fallback replaced
/// that output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    code: String,
    dialect: Dialect,
    success: bool,
    is_valid: bool,
    status: GenerationStatus,
    status_message: String,
    violations: Vec<Violation>,
    unresolved_violations: Vec<Violation>,
    advisories: Vec<Violation>,
    used_fallback: bool,
    attempts: usize,
}

impl GenerationResult {
    /// Valid model output.
    pub(crate) fn valid(
        code: String,
        dialect: Dialect,
        status: GenerationStatus,
        status_message: String,
        advisories: Vec<Violation>,
        attempts: usize,
    ) -> Self {
        Self {
            code,
            dialect,
            success: true,
            is_valid: true,
            status,
            status_message,
            violations: Vec::new(),
            unresolved_violations: Vec::new(),
            advisories,
            used_fallback: false,
            attempts,
        }
    }

    /// Invalid model output returned as is.
    pub(crate) fn best_effort(
        code: String,
        dialect: Dialect,
        status_message: String,
        violations: Vec<Violation>,
        attempts: usize,
    ) -> Self {
        Self {
            code,
            dialect,
            success: false,
            is_valid: false,
            status: GenerationStatus::BestEffort,
            status_message,
            unresolved_violations: violations.clone(),
            violations,
            advisories: Vec::new(),
            used_fallback: false,
            attempts,
        }
    }

    /// The dialect's fallback template.
    pub(crate) fn fallback(
        dialect: Dialect,
        status: GenerationStatus,
        status_message: String,
        unresolved_violations: Vec<Violation>,
        attempts: usize,
    ) -> Self {
        Self {
            code: umlscribe_core::fallback::template(dialect).to_string(),
            dialect,
            success: false,
            is_valid: true,
            status,
            status_message,
            violations: Vec::new(),
            unresolved_violations,
            advisories: Vec::new(),
            used_fallback: true,
            attempts,
        }
    }

    /// The returned markup.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Consumes the result and returns the markup.
    pub fn into_code(self) -> String {
        self.code
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Whether the returned markup is model output that validates.
    pub fn success(&self) -> bool {
        self.success
    }

    /// Whether the returned markup validates.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    /// Human readable status.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Violations of the returned markup.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Violations of the model output that could not be repaired.
    pub fn unresolved_violations(&self) -> &[Violation] {
        &self.unresolved_violations
    }

    /// Warnings about the returned model output.
    pub fn advisories(&self) -> &[Violation] {
        &self.advisories
    }

    pub fn used_fallback(&self) -> bool {
        self.used_fallback
    }

    /// Number of repair-phase generator calls.
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}
