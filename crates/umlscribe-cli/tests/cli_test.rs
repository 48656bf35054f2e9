use std::{fs, path::Path};

use tempfile::{TempDir, tempdir};

use umlscribe::{Dialect, ScribeError, fallback};
use umlscribe_cli::{
    Args, ClassifyArgs, Command, GenerateArgs, NormalizeArgs, ValidateArgs,
    error_adapter::{exit_status, to_reportables},
    run,
};

/// Points the model at a closed local port so every call fails fast.
const UNREACHABLE_CONFIG: &str = r#"
[repair]
max_attempts = 1

[llm]
base_url = "http://127.0.0.1:9/v1"
timeout_secs = 1
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write test input");
    path.to_string_lossy().to_string()
}

fn args(command: Command, config: Option<String>) -> Args {
    Args {
        command,
        config,
        log_level: "off".to_string(),
    }
}

fn generate_args(transcripts: Vec<String>, output: &Path, json: bool) -> GenerateArgs {
    GenerateArgs {
        transcripts,
        dialect: "class".to_string(),
        keywords: vec!["order".to_string()],
        summary: None,
        output: Some(output.to_string_lossy().to_string()),
        json,
    }
}

#[test]
fn e2e_normalize_then_validate() {
    let dir = tempdir().expect("Failed to create temp directory");
    let input = write(
        &dir,
        "raw.txt",
        "Sure! Here it is:\n```plantuml\n@startuml\nclass Animal\nclass Dog\nDog --|> Animal\n@enduml\n```",
    );
    let output = dir.path().join("clean.puml");

    run(&args(
        Command::Normalize(NormalizeArgs {
            input,
            dialect: "class".to_string(),
            output: Some(output.to_string_lossy().to_string()),
        }),
        None,
    ))
    .expect("normalize failed");

    let code = fs::read_to_string(&output).unwrap();
    assert!(code.starts_with("@startuml"));
    assert!(code.contains("Animal <|-- Dog"));

    run(&args(
        Command::Validate(ValidateArgs {
            input: output.to_string_lossy().to_string(),
            dialect: Some("class".to_string()),
        }),
        None,
    ))
    .expect("normalized markup should validate");
}

#[test]
fn e2e_validate_reports_each_violation() {
    let dir = tempdir().expect("Failed to create temp directory");
    let input = write(&dir, "broken.puml", "class Order {");

    let err = run(&args(
        Command::Validate(ValidateArgs {
            input,
            dialect: Some("class".to_string()),
        }),
        None,
    ))
    .unwrap_err();

    let ScribeError::Validation { verdict, .. } = &err else {
        panic!("expected a validation error, got {err:?}");
    };
    assert!(!verdict.is_valid());
    assert_eq!(to_reportables(&err).len(), verdict.violations().len());
    assert_eq!(exit_status(&err), 3);
}

#[test]
fn e2e_unknown_dialect() {
    let dir = tempdir().expect("Failed to create temp directory");
    let input = write(&dir, "diagram.puml", "@startuml\n@enduml");

    let err = run(&args(
        Command::Normalize(NormalizeArgs {
            input,
            dialect: "mindmap".to_string(),
            output: None,
        }),
        None,
    ))
    .unwrap_err();

    assert!(matches!(err, ScribeError::UnknownDialect(_)));
    assert_eq!(exit_status(&err), 2);
}

#[test]
fn e2e_classify() {
    let dir = tempdir().expect("Failed to create temp directory");
    let transcript = write(
        &dir,
        "meeting.txt",
        "We need a database schema: every table gets a primary key column.",
    );

    run(&args(
        Command::Classify(ClassifyArgs {
            transcript,
            top: Some(3),
        }),
        None,
    ))
    .expect("classify failed");
}

#[test]
fn e2e_generate_falls_back_when_model_is_unreachable() {
    let dir = tempdir().expect("Failed to create temp directory");
    let config = write(&dir, "config.toml", UNREACHABLE_CONFIG);
    let transcript = write(&dir, "meeting.txt", "Customers place orders.");
    let output = dir.path().join("diagram.puml");

    run(&args(
        Command::Generate(generate_args(vec![transcript], &output, false)),
        Some(config),
    ))
    .expect("generation never fails");

    let code = fs::read_to_string(&output).unwrap();
    assert_eq!(code.trim_end(), fallback::template(Dialect::Class));
}

#[test]
fn e2e_generate_json_batch() {
    let dir = tempdir().expect("Failed to create temp directory");
    let config = write(&dir, "config.toml", UNREACHABLE_CONFIG);
    let first = write(&dir, "first.txt", "Customers place orders.");
    let second = write(&dir, "second.txt", "Orders contain items.");
    let output = dir.path().join("result.json");

    run(&args(
        Command::Generate(generate_args(vec![first, second], &output, true)),
        Some(config),
    ))
    .expect("generation never fails");

    for id in 1..=2 {
        let path = dir.path().join(format!("result-{id}.json"));
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(json["used_fallback"], true);
        assert_eq!(json["is_valid"], true);
        assert_eq!(json["success"], false);
        assert_eq!(json["status"], "fallback_generation_failed");
        assert_eq!(json["attempts"], 0);
    }
    assert!(!output.exists());
}
