//! # umlscribe Markup
//!
//! Cleanup and validation of PlantUML markup produced by language models.
//!
//! Model output is unreliable: it arrives wrapped in prose, mixes notations
//! from different diagram types and uses legacy arrow spellings. This crate
//! turns it into markup a renderer accepts, and explains what is still wrong.
//!
//! ## Usage
//!
//! ```
//! # use umlscribe_markup::{normalize, validate};
//! # use umlscribe_core::Dialect;
//!
//! let raw = "Sure!\n@startuml\nclass Animal\nclass Dog\nDog --|> Animal\n@enduml";
//! let code = normalize(raw, Dialect::Class);
//! let verdict = validate(&code, Some(Dialect::Class));
//!
//! assert!(verdict.is_valid());
//! ```

mod error;
mod normalize;
mod span;
pub mod substitution;
mod validate;

pub use error::{Label, Severity, ValidationVerdict, Violation, ViolationCollector};
pub use normalize::{STYLING, normalize};
pub use span::Span;
pub use validate::validate;
