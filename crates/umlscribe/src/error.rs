//! Error types for umlscribe operations.
//!
//! This module provides the main error type [`ScribeError`]. Diagram
//! generation itself never fails: every failure there resolves into a
//! [`GenerationResult`](crate::GenerationResult). This type covers the paths
//! that surface failures explicitly, such as validating a file or calling a
//! generator directly.

use std::io;

use thiserror::Error;

use umlscribe_core::UnknownDialect;
use umlscribe_markup::ValidationVerdict;

use crate::generator::GenerationError;

/// The main error type for umlscribe operations.
///
/// # Diagnostic Variants
///
/// The `Validation` variant keeps the checked markup next to the verdict, so
/// every violation span can be rendered against its source.
#[derive(Debug, Error)]
pub enum ScribeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    UnknownDialect(#[from] UnknownDialect),

    #[error("{verdict}")]
    Validation {
        verdict: ValidationVerdict,
        src: String,
    },

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Artifact generation failed: {0}")]
    Artifact(String),
}

impl ScribeError {
    /// Create a new `Validation` error with the associated source code.
    pub fn new_validation_error(verdict: ValidationVerdict, src: impl Into<String>) -> Self {
        Self::Validation {
            verdict,
            src: src.into(),
        }
    }
}
