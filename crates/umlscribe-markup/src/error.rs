//! Violation reporting for markup validation.

mod collector;
mod label;
mod severity;
mod verdict;
mod violation;

pub use collector::ViolationCollector;
pub use label::Label;
pub use severity::Severity;
pub use verdict::ValidationVerdict;
pub use violation::Violation;
