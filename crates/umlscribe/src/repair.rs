//! The bounded repair loop.
//!
//! The orchestrator feeds invalid markup back to the generator together with
//! its violations, at most [`RepairConfig::max_attempts`] times. After the
//! first repair, every further repair must strictly reduce the violation
//! count or the loop stops early. When the loop gives up, the dialect's
//! fallback template is returned.

use log::{debug, info, warn};

use umlscribe_markup::{ValidationVerdict, Violation, normalize, validate};

use crate::{
    config::{PromptConfig, RepairConfig},
    generator::{GenerationError, Generator},
    prompt,
    request::GenerationRequest,
    result::{GenerationResult, GenerationStatus},
};

const STATUS_DETAIL_LIMIT: usize = 100;

/// One repair-phase generation.
#[derive(Debug, Clone)]
pub struct RepairAttempt {
    /// 1-based attempt number.
    pub index: usize,
    /// Normalized markup produced by the attempt.
    pub code: String,
    /// Verdict of `code`.
    pub verdict: ValidationVerdict,
}

/// Drives the repair loop for one request.
#[derive(Debug, Clone, Copy)]
pub struct RepairOrchestrator<'a> {
    repair: &'a RepairConfig,
    prompts: &'a PromptConfig,
}

impl<'a> RepairOrchestrator<'a> {
    pub fn new(repair: &'a RepairConfig, prompts: &'a PromptConfig) -> Self {
        Self { repair, prompts }
    }

    /// Repairs `initial` until it validates or the loop gives up.
    ///
    /// # Arguments
    ///
    /// * `initial` - Normalized markup of the first generation.
    /// * `initial_verdict` - Verdict of `initial` for the request's dialect.
    /// * `request` - The request, used as prompt context.
    /// * `generator` - The text generator.
    ///
    /// # Returns
    ///
    /// A complete [`GenerationResult`]. Generator failures are folded into
    /// a fallback result and never propagate.
    pub fn repair<G>(
        &self,
        initial: String,
        initial_verdict: ValidationVerdict,
        request: &GenerationRequest,
        generator: &G,
    ) -> GenerationResult
    where
        G: Generator + ?Sized,
    {
        if initial_verdict.is_valid() {
            return self.improve(initial, initial_verdict, request, generator);
        }

        let dialect = request.dialect();
        let initial_count = initial_verdict.violations().len();
        let mut current = RepairAttempt {
            index: 0,
            code: initial,
            verdict: initial_verdict,
        };
        let mut best: Option<RepairAttempt> = None;

        loop {
            if current.index == self.repair.max_attempts() {
                info!(
                    dialect = dialect.slug(),
                    attempts = current.index;
                    "Repair attempts exhausted"
                );
                let message = format!("Used fallback after {} repair attempt(s)", current.index);
                return self.give_up(
                    request,
                    GenerationStatus::FallbackExhausted,
                    message,
                    current,
                    best,
                    initial_count,
                );
            }

            let prompt = prompt::repair(
                &current.code,
                &current.verdict.messages(),
                request,
                self.prompts,
            );
            let index = current.index + 1;
            debug!(dialect = dialect.slug(), attempt = index; "Requesting repair");

            let raw = match generator.generate(&prompt) {
                Ok(raw) => raw,
                Err(err) => {
                    return generation_failed(
                        request,
                        &err,
                        current.verdict.into_violations(),
                        index,
                    );
                }
            };

            let code = normalize(&raw, dialect);
            let verdict = validate(&code, Some(dialect));
            let attempt = RepairAttempt {
                index,
                code,
                verdict,
            };

            if attempt.verdict.is_valid() {
                info!(dialect = dialect.slug(), attempts = index; "Repair succeeded");
                return GenerationResult::valid(
                    attempt.code,
                    dialect,
                    GenerationStatus::Repaired,
                    format!("Repaired after {index} attempt(s)"),
                    attempt.verdict.advisories().to_vec(),
                    index,
                );
            }

            let previous_count = current.verdict.violations().len();
            let count = attempt.verdict.violations().len();
            debug!(
                dialect = dialect.slug(),
                attempt = index,
                previous_count,
                count;
                "Repair attempt still invalid"
            );

            if best
                .as_ref()
                .is_none_or(|best| count < best.verdict.violations().len())
            {
                best = Some(attempt.clone());
            }

            if index > 1 && count >= previous_count {
                warn!(
                    dialect = dialect.slug(),
                    attempt = index,
                    previous_count,
                    count;
                    "Repair did not reduce violations"
                );
                let message =
                    format!("Used fallback: repair attempt {index} did not reduce violations");
                return self.give_up(
                    request,
                    GenerationStatus::FallbackStalled,
                    message,
                    attempt,
                    best,
                    initial_count,
                );
            }

            current = attempt;
        }
    }

    /// Runs the optional improvement pass on valid markup.
    fn improve<G>(
        &self,
        code: String,
        verdict: ValidationVerdict,
        request: &GenerationRequest,
        generator: &G,
    ) -> GenerationResult
    where
        G: Generator + ?Sized,
    {
        let dialect = request.dialect();
        let advisories = verdict.advisories().to_vec();

        if !self.repair.improvement_pass() || self.repair.max_attempts() == 0 {
            return GenerationResult::valid(
                code,
                dialect,
                GenerationStatus::Generated,
                format!("Generated valid {dialect}"),
                advisories,
                0,
            );
        }

        let advisory_messages: Vec<String> = advisories
            .iter()
            .map(|advisory| advisory.message().to_string())
            .collect();
        let prompt = prompt::improvement(&code, &advisory_messages, request, self.prompts);

        let improved = match generator.generate(&prompt) {
            Ok(raw) => normalize(&raw, dialect),
            Err(err) => {
                warn!(dialect = dialect.slug(), kind = err.kind(); "Improvement pass failed");
                return GenerationResult::valid(
                    code,
                    dialect,
                    GenerationStatus::Generated,
                    format!(
                        "Kept original: improvement failed ({}): {}",
                        err.kind(),
                        prompt::excerpt(&err.to_string(), STATUS_DETAIL_LIMIT)
                    ),
                    advisories,
                    1,
                );
            }
        };

        let improved_verdict = validate(&improved, Some(dialect));
        if improved_verdict.is_valid() {
            info!(dialect = dialect.slug(); "Improvement accepted");
            GenerationResult::valid(
                improved,
                dialect,
                GenerationStatus::Improved,
                "Improved after 1 revision attempt".to_string(),
                improved_verdict.advisories().to_vec(),
                1,
            )
        } else {
            info!(
                dialect = dialect.slug(),
                violations = improved_verdict.violations().len();
                "Improvement rejected"
            );
            GenerationResult::valid(
                code,
                dialect,
                GenerationStatus::Generated,
                "Kept original: improved code did not validate".to_string(),
                advisories,
                1,
            )
        }
    }

    /// Ends the loop with either the best near miss or the fallback.
    fn give_up(
        &self,
        request: &GenerationRequest,
        status: GenerationStatus,
        message: String,
        last: RepairAttempt,
        best: Option<RepairAttempt>,
        initial_count: usize,
    ) -> GenerationResult {
        let dialect = request.dialect();
        let attempts = last.index;

        let best = best.filter(|best| {
            self.repair.best_effort_on_exhaustion() && best.verdict.violations().len() < initial_count
        });
        if let Some(best) = best {
            let violations = best.verdict.into_violations();
            info!(
                dialect = dialect.slug(),
                attempt = best.index,
                violations = violations.len();
                "Returning best effort"
            );
            return GenerationResult::best_effort(
                best.code,
                dialect,
                format!(
                    "Returning best attempt with {} unresolved violation(s) after {attempts} attempt(s)",
                    violations.len()
                ),
                violations,
                attempts,
            );
        }

        GenerationResult::fallback(
            dialect,
            status,
            message,
            last.verdict.into_violations(),
            attempts,
        )
    }
}

/// Fallback result for a failed generator call.
pub(crate) fn generation_failed(
    request: &GenerationRequest,
    err: &GenerationError,
    unresolved: Vec<Violation>,
    attempts: usize,
) -> GenerationResult {
    warn!(
        dialect = request.dialect().slug(),
        kind = err.kind(),
        attempts;
        "Generation failed, using fallback"
    );
    GenerationResult::fallback(
        request.dialect(),
        GenerationStatus::FallbackGenerationFailed,
        format!(
            "Generation failed ({}): {}",
            err.kind(),
            prompt::excerpt(&err.to_string(), STATUS_DETAIL_LIMIT)
        ),
        unresolved,
        attempts,
    )
}
