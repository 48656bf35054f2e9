//! umlscribe - Meeting transcripts to validated PlantUML diagrams.
//!
//! A language model writes the first draft of the diagram. The draft is
//! normalized and validated against the grammar of the requested dialect;
//! invalid drafts go through a bounded repair loop, and when that fails a
//! static template guarantees that the caller always receives renderable
//! markup.

pub mod config;

mod artifact;
mod classify;
mod error;
mod generator;
mod prompt;
mod repair;
mod request;
mod result;

pub use umlscribe_core::{
    Delimiters, Dialect, UnknownDialect, ViolationClass, ViolationCode, fallback,
};
pub use umlscribe_markup::{Severity, Span, ValidationVerdict, Violation, normalize, validate};

pub use artifact::{ArtifactGenerator, ArtifactResult};
pub use classify::{DialectClassifier, DialectRecommendation};
pub use error::ScribeError;
pub use generator::{GenerationError, Generator};
pub use repair::{RepairAttempt, RepairOrchestrator};
pub use request::GenerationRequest;
pub use result::{GenerationResult, GenerationStatus};

use log::{debug, info, trace};

use config::AppConfig;

/// Generates diagrams for transcripts with an injected [`Generator`].
///
/// Every call returns a complete [`GenerationResult`]. The generator is
/// called at most `repair.max_attempts + 1` times per request.
///
/// # Examples
///
/// ```rust
/// use umlscribe::{DiagramGenerator, Dialect, GenerationError, GenerationRequest, config::AppConfig};
///
/// let model = |_prompt: &str| -> Result<String, GenerationError> {
///     Ok("```plantuml\n@startuml\nclass Order\nclass Customer\nCustomer --> Order\n@enduml\n```".to_string())
/// };
///
/// let generator = DiagramGenerator::new(model, AppConfig::default());
/// let request = GenerationRequest::new("Customers place orders.", Dialect::Class)
///     .with_keywords(["customer", "order"]);
///
/// let result = generator.generate(&request);
/// assert!(result.success());
/// assert_eq!(result.attempts(), 0);
/// ```
pub struct DiagramGenerator<G> {
    generator: G,
    config: AppConfig,
}

impl<G: Generator> DiagramGenerator<G> {
    /// Create a new diagram generator.
    ///
    /// # Arguments
    ///
    /// * `generator` - Text generator called with every prompt
    /// * `config` - Repair, prompt and model settings
    pub fn new(generator: G, config: AppConfig) -> Self {
        Self { generator, config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The injected generator.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Generate a diagram for `request`.
    ///
    /// Builds the dialect's initial prompt, calls the generator once and
    /// validates the normalized output. Valid output is returned directly,
    /// unless the improvement pass is enabled; invalid output goes through
    /// the [`RepairOrchestrator`]. A failing initial call yields the
    /// dialect's fallback with zero attempts.
    ///
    /// # Arguments
    ///
    /// * `request` - Transcript, dialect and optional context
    pub fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        let dialect = request.dialect();
        info!(
            dialect = dialect.slug(),
            keywords = request.keywords().len();
            "Generating diagram"
        );

        let prompt = prompt::initial(request, self.config.prompt());
        trace!(prompt:?; "Initial prompt");

        let raw = match self.generator.generate(&prompt) {
            Ok(raw) => raw,
            Err(err) => return repair::generation_failed(request, &err, Vec::new(), 0),
        };

        let code = normalize(&raw, dialect);
        let verdict = validate(&code, Some(dialect));
        debug!(
            dialect = dialect.slug(),
            valid = verdict.is_valid(),
            violations = verdict.violations().len();
            "Initial generation validated"
        );

        RepairOrchestrator::new(self.config.repair(), self.config.prompt()).repair(
            code,
            verdict,
            request,
            &self.generator,
        )
    }
}
