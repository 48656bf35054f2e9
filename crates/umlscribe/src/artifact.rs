//! Code artifacts from diagram markup.
//!
//! Class diagrams become Java classes and ER diagrams become SQL tables. Any
//! other markup goes through a prompt that lets the model decide.

use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use umlscribe_core::Dialect;

use crate::{generator::Generator, prompt};

/// Extracted code shorter than this is treated as a failed generation.
const MIN_CODE_LEN: usize = 10;

static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(\w*)[ \t]*\n?(.*?)```").expect("fenced block pattern is valid")
});

/// Generated code and how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactResult {
    pub code: String,
    /// `java`, `sql`, `plain`, or `unknown` when generation failed.
    pub language: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Converts markup into code with a [`Generator`].
#[derive(Debug, Clone)]
pub struct ArtifactGenerator<G> {
    generator: G,
}

impl<G: Generator> ArtifactGenerator<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Generates code for `markup`.
    ///
    /// Never fails: generator errors and unusable output are reported through
    /// [`ArtifactResult::success`] and [`ArtifactResult::error`].
    pub fn generate(&self, markup: &str, dialect: Option<Dialect>) -> ArtifactResult {
        let (prompt, expected) = prompt::artifact(markup, dialect);

        let output = match self.generator.generate(&prompt) {
            Ok(output) => output,
            Err(err) => {
                warn!(kind = err.kind(); "Artifact generation failed");
                return ArtifactResult {
                    code: String::new(),
                    language: "unknown".to_string(),
                    success: false,
                    error: Some(err.to_string()),
                };
            }
        };

        let (detected, code) = extract(&output);
        let language = expected.or(detected).unwrap_or("plain").to_string();

        if code.trim().len() < MIN_CODE_LEN {
            warn!(language, length = code.trim().len(); "Generated code is too short");
            return ArtifactResult {
                code: output,
                language,
                success: false,
                error: Some("Generated code appears to be too short or incomplete".to_string()),
            };
        }

        info!(language, length = code.len(); "Generated artifact");
        ArtifactResult {
            code: code.to_string(),
            language,
            success: true,
            error: None,
        }
    }
}

/// Returns the fence language and the trimmed body of the first fenced
/// block, or the whole trimmed output when there is none.
///
/// Only `java` and `sql` fences report a language; the tag of any other
/// fence is dropped from the body.
fn extract(output: &str) -> (Option<&'static str>, &str) {
    match FENCED_BLOCK.captures(output) {
        Some(captures) => {
            let language = captures.get(1).and_then(|m| fence_language(m.as_str()));
            let body = captures.get(2).map_or("", |m| m.as_str());
            (language, body.trim())
        }
        None => (None, output.trim()),
    }
}

fn fence_language(tag: &str) -> Option<&'static str> {
    ["java", "sql"]
        .into_iter()
        .find(|language| tag.eq_ignore_ascii_case(language))
}

#[cfg(test)]
mod tests {
    use crate::generator::GenerationError;

    use super::*;

    const JAVA_OUTPUT: &str = "Here you go:\n```java\npublic class Order {\n    private int id;\n}\n```\nDone.";

    fn answering(output: &'static str) -> impl Fn(&str) -> Result<String, GenerationError> {
        move |_: &str| Ok(output.to_string())
    }

    #[test]
    fn test_extracts_fenced_block() {
        let artifacts = ArtifactGenerator::new(answering(JAVA_OUTPUT));
        let result = artifacts.generate("@startuml\nclass Order\n@enduml", Some(Dialect::Class));

        assert!(result.success);
        assert_eq!(result.language, "java");
        assert_eq!(result.code, "public class Order {\n    private int id;\n}");
        assert!(result.error.is_none());
    }

    #[test]
    fn test_expected_language_wins() {
        let artifacts = ArtifactGenerator::new(answering(JAVA_OUTPUT));
        let result = artifacts.generate("@startchen\n@endchen", Some(Dialect::EntityRelationship));
        assert_eq!(result.language, "sql");
    }

    #[test]
    fn test_detected_language_without_dialect() {
        let output = "```sql\nCREATE TABLE customer (id INT PRIMARY KEY);\n```";
        let artifacts = ArtifactGenerator::new(answering(output));
        let result = artifacts.generate("@startchen\n@endchen", None);

        assert!(result.success);
        assert_eq!(result.language, "sql");
        assert_eq!(result.code, "CREATE TABLE customer (id INT PRIMARY KEY);");
    }

    #[test]
    fn test_other_fence_languages_are_not_detected() {
        let cases = [
            (
                "```javascript\nclass Order { constructor() {} }\n```",
                "class Order { constructor() {} }",
            ),
            ("```python\nclass Order:\n    pass\n```", "class Order:\n    pass"),
            ("```\nCREATE TABLE item (id INT);\n```", "CREATE TABLE item (id INT);"),
        ];

        for (output, code) in cases {
            let (detected, body) = extract(output);
            assert_eq!(detected, None, "{output}");
            assert_eq!(body, code);
        }
    }

    #[test]
    fn test_javascript_fence_is_plain_without_dialect() {
        let output = "```javascript\nclass Order { constructor() {} }\n```";
        let artifacts = ArtifactGenerator::new(answering(output));
        let result = artifacts.generate("@startuml\n@enduml", None);

        assert!(result.success);
        assert_eq!(result.language, "plain");
        assert_eq!(result.code, "class Order { constructor() {} }");
    }

    #[test]
    fn test_unfenced_output_is_plain() {
        let output = "CREATE TABLE customer (id INT PRIMARY KEY);";
        let artifacts = ArtifactGenerator::new(answering(output));
        let result = artifacts.generate("@startuml\n@enduml", Some(Dialect::Sequence));

        assert!(result.success);
        assert_eq!(result.language, "plain");
        assert_eq!(result.code, output);
    }

    #[test]
    fn test_short_code_fails_with_raw_output() {
        let output = "```java\nint x;\n```";
        let artifacts = ArtifactGenerator::new(answering(output));
        let result = artifacts.generate("@startuml\n@enduml", Some(Dialect::Class));

        assert!(!result.success);
        assert_eq!(result.code, output);
        assert_eq!(
            result.error.as_deref(),
            Some("Generated code appears to be too short or incomplete")
        );
    }

    #[test]
    fn test_generator_error() {
        let failing =
            |_: &str| -> Result<String, GenerationError> { Err(GenerationError::EmptyResponse) };
        let result = ArtifactGenerator::new(failing).generate("@startuml\n@enduml", None);

        assert!(!result.success);
        assert_eq!(result.language, "unknown");
        assert!(result.code.is_empty());
        assert_eq!(result.error.as_deref(), Some("empty response"));
    }
}
