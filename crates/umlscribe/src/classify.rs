//! Keyword-based dialect recommendation.
//!
//! Each profile scores the fraction of its keywords that occur in the
//! lower-cased transcript. Flowcharts and activity diagrams have separate
//! profiles that both recommend [`Dialect::Activity`].

use log::debug;
use serde::Serialize;

use umlscribe_core::Dialect;

/// Recommendations at or below this confidence are dropped by [`DialectClassifier::top`].
const RELEVANCE_THRESHOLD: f64 = 0.1;

/// Below this confidence the reasoning asks for manual review.
const LOW_CONFIDENCE: f64 = 0.3;

struct Profile {
    dialect: Dialect,
    label: &'static str,
    keywords: &'static [&'static str],
    rationale: &'static str,
    purpose: &'static str,
}

static PROFILES: [Profile; 7] = [
    Profile {
        dialect: Dialect::Class,
        label: "Class Diagram",
        keywords: &[
            "class",
            "object",
            "inheritance",
            "encapsulation",
            "polymorphism",
            "attributes",
            "methods",
            "relationships",
            "entities",
        ],
        rationale: "Meeting discusses object-oriented concepts",
        purpose: "best represents class relationships and structure",
    },
    Profile {
        dialect: Dialect::Sequence,
        label: "Sequence Diagram",
        keywords: &[
            "sequence",
            "interaction",
            "message",
            "lifeline",
            "activation",
            "flow",
            "process",
            "step by step",
            "timeline",
        ],
        rationale: "Meeting focuses on process flows and interactions",
        purpose: "shows message exchanges and timing",
    },
    Profile {
        dialect: Dialect::Activity,
        label: "Flowchart",
        keywords: &[
            "process",
            "decision",
            "flow",
            "workflow",
            "business process",
            "steps",
            "if else",
            "condition",
            "branch",
        ],
        rationale: "Meeting describes business processes and decision points",
        purpose: "visualizes the workflow steps",
    },
    Profile {
        dialect: Dialect::Component,
        label: "Component Diagram",
        keywords: &[
            "component",
            "system",
            "architecture",
            "module",
            "service",
            "interface",
            "deployment",
            "infrastructure",
        ],
        rationale: "Meeting covers system architecture and components",
        purpose: "shows system structure and interfaces",
    },
    Profile {
        dialect: Dialect::UseCase,
        label: "Use Case Diagram",
        keywords: &[
            "user",
            "actor",
            "use case",
            "requirement",
            "functionality",
            "interaction",
            "goal",
            "scenario",
        ],
        rationale: "Meeting discusses user requirements and interactions",
        purpose: "captures user goals and system functionality",
    },
    Profile {
        dialect: Dialect::Activity,
        label: "Activity Diagram",
        keywords: &[
            "activity",
            "workflow",
            "action",
            "state",
            "transition",
            "parallel",
            "concurrent",
            "business process",
        ],
        rationale: "Meeting describes workflows and activities",
        purpose: "shows process flow and parallel activities",
    },
    Profile {
        dialect: Dialect::EntityRelationship,
        label: "ER Diagram",
        keywords: &[
            "entity",
            "table",
            "database",
            "schema",
            "primary key",
            "foreign key",
            "column",
            "record",
            "cardinality",
        ],
        rationale: "Meeting discusses stored data and how it relates",
        purpose: "captures entities, attributes and cardinalities",
    },
];

/// A scored dialect suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialectRecommendation {
    pub dialect: Dialect,
    /// Fraction of the profile's keywords found, in `0.0..=1.0`.
    pub confidence: f64,
    /// Keywords found, in profile order.
    pub keywords: Vec<String>,
    pub reasoning: String,
}

/// Recommends a dialect for a transcript.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialectClassifier;

impl DialectClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Returns the best scoring recommendation. Ties go to the profile
    /// declared first.
    pub fn recommend(&self, transcript: &str) -> DialectRecommendation {
        let content = transcript.to_lowercase();
        let mut best = score(&PROFILES[0], &content);
        for profile in &PROFILES[1..] {
            let candidate = score(profile, &content);
            if candidate.confidence > best.confidence {
                best = candidate;
            }
        }
        debug!(
            dialect = best.dialect.slug(),
            confidence = best.confidence;
            "Classified transcript"
        );
        best
    }

    /// Returns up to `k` recommendations above the relevance threshold,
    /// highest confidence first, with at most one entry per dialect.
    pub fn top(&self, transcript: &str, k: usize) -> Vec<DialectRecommendation> {
        let content = transcript.to_lowercase();
        let mut recommendations: Vec<DialectRecommendation> = PROFILES
            .iter()
            .map(|profile| score(profile, &content))
            .filter(|recommendation| recommendation.confidence > RELEVANCE_THRESHOLD)
            .collect();
        recommendations.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        let mut seen = Vec::with_capacity(k);
        recommendations.retain(|recommendation| {
            if seen.contains(&recommendation.dialect) {
                false
            } else {
                seen.push(recommendation.dialect);
                true
            }
        });
        recommendations.truncate(k);
        recommendations
    }
}

fn score(profile: &Profile, content: &str) -> DialectRecommendation {
    let keywords: Vec<String> = profile
        .keywords
        .iter()
        .filter(|keyword| content.contains(*keyword))
        .map(|keyword| keyword.to_string())
        .collect();
    let confidence = keywords.len() as f64 / profile.keywords.len() as f64;
    let reasoning = reasoning(profile, confidence, &keywords);

    DialectRecommendation {
        dialect: profile.dialect,
        confidence,
        keywords,
        reasoning,
    }
}

fn reasoning(profile: &Profile, confidence: f64, keywords: &[String]) -> String {
    if confidence < LOW_CONFIDENCE {
        return format!(
            "Low confidence in {}. Consider manual review.",
            profile.label
        );
    }
    let shown = keywords
        .iter()
        .take(3)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} with keywords: {shown}. {} {}.",
        profile.rationale, profile.label, profile.purpose
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommends_highest_fraction() {
        let transcript = "The component architecture splits the system into a billing \
                          service and a module per interface.";
        let recommendation = DialectClassifier::new().recommend(transcript);

        assert_eq!(recommendation.dialect, Dialect::Component);
        assert_eq!(
            recommendation.keywords,
            ["component", "system", "architecture", "module", "service", "interface"]
        );
        assert!((recommendation.confidence - 0.75).abs() < f64::EPSILON);
        assert_eq!(
            recommendation.reasoning,
            "Meeting covers system architecture and components with keywords: component, \
             system, architecture. Component Diagram shows system structure and interfaces."
        );
    }

    #[test]
    fn test_no_match_is_low_confidence() {
        let recommendation = DialectClassifier::new().recommend("Lunch was great.");

        assert_eq!(recommendation.dialect, Dialect::Class);
        assert_eq!(recommendation.confidence, 0.0);
        assert!(recommendation.keywords.is_empty());
        assert_eq!(
            recommendation.reasoning,
            "Low confidence in Class Diagram. Consider manual review."
        );
    }

    #[test]
    fn test_tie_goes_to_first_profile() {
        // "process" and "flow" score 2/9 for sequence and for flowchart.
        let recommendation = DialectClassifier::new().recommend("the process flow");
        assert_eq!(recommendation.dialect, Dialect::Sequence);
    }

    #[test]
    fn test_top_filters_and_sorts() {
        let transcript = "Each database table is an entity with a primary key column. \
                          The user needs this functionality.";
        let top = DialectClassifier::new().top(transcript, 3);

        let dialects: Vec<Dialect> = top.iter().map(|r| r.dialect).collect();
        assert_eq!(dialects, [Dialect::EntityRelationship, Dialect::UseCase]);
        assert!(top[0].confidence > top[1].confidence);
    }

    #[test]
    fn test_top_keeps_one_entry_per_dialect() {
        let transcript = "workflow with a decision, a condition and a branch; \
                          each activity is an action with a state transition";
        let top = DialectClassifier::new().top(transcript, 5);

        let activity = top
            .iter()
            .filter(|r| r.dialect == Dialect::Activity)
            .count();
        assert_eq!(activity, 1);
    }

    #[test]
    fn test_top_respects_k() {
        let transcript = "class object user actor component system entity table";
        assert_eq!(DialectClassifier::new().top(transcript, 2).len(), 2);
        assert!(DialectClassifier::new().top(transcript, 0).is_empty());
    }
}
