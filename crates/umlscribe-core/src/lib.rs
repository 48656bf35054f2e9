//! umlscribe Core Types and Definitions
//!
//! This crate provides the foundational, dependency-light definitions shared
//! by the umlscribe crates. It includes:
//!
//! - **Dialects**: The closed set of supported diagram grammars ([`Dialect`])
//!   and their delimiter tags ([`Delimiters`])
//! - **Violation codes**: Codes and classes of grammar violations ([`code`] module)
//! - **Grammar**: Per-dialect required, forbidden and advisory rules ([`grammar`] module)
//! - **Fallbacks**: Static, known-valid diagrams per dialect ([`fallback`] module)

pub mod code;
pub mod dialect;
pub mod fallback;
pub mod grammar;

pub use code::{ViolationClass, ViolationCode};
pub use dialect::{Delimiters, Dialect, UnknownDialect};
