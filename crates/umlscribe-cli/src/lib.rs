//! CLI logic for the umlscribe diagram tool.
//!
//! Every subcommand reads its input files, runs one library operation and
//! writes the result to a file or stdout.

pub mod error_adapter;
pub mod http;

mod args;
mod config;
mod sequence;

pub use args::{
    Args, ClassifyArgs, CodeArgs, Command, GenerateArgs, NormalizeArgs, ValidateArgs,
};
pub use sequence::RequestSequence;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use umlscribe::{
    ArtifactGenerator, DiagramGenerator, Dialect, DialectClassifier, GenerationRequest,
    ScribeError, config::AppConfig, normalize, validate,
};

use http::HttpGenerator;

/// Run the umlscribe CLI application
///
/// Dispatches the parsed subcommand. Diagram generation itself never fails:
/// a transcript the model cannot handle still produces its dialect's
/// fallback diagram.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ScribeError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Unknown diagram types
/// - Invalid markup (`validate`)
/// - Unusable code artifacts (`code`)
pub fn run(args: &Args) -> Result<(), ScribeError> {
    let app_config = config::load_config(args.config.as_ref())?;

    match &args.command {
        Command::Generate(generate_args) => generate(generate_args, app_config),
        Command::Normalize(normalize_args) => normalize_file(normalize_args),
        Command::Validate(validate_args) => validate_file(validate_args),
        Command::Classify(classify_args) => classify(classify_args),
        Command::Code(code_args) => code(code_args, &app_config),
    }
}

fn generate(args: &GenerateArgs, app_config: AppConfig) -> Result<(), ScribeError> {
    let fixed_dialect = match args.dialect.as_str() {
        "auto" => None,
        label => Some(label.parse::<Dialect>()?),
    };
    let summary = args.summary.as_ref().map(fs::read_to_string).transpose()?;

    let model = HttpGenerator::new(app_config.llm())?;
    info!(endpoint = model.endpoint(), model = app_config.llm().model(); "Using chat completions endpoint");

    let generator = DiagramGenerator::new(model, app_config);
    let classifier = DialectClassifier::new();
    let mut sequence = RequestSequence::new();
    let batch = args.transcripts.len() > 1;

    for transcript_path in &args.transcripts {
        let request_id = sequence.next();
        let transcript = fs::read_to_string(transcript_path)?;

        let dialect = match fixed_dialect {
            Some(dialect) => dialect,
            None => {
                let recommendation = classifier.recommend(&transcript);
                info!(
                    request_id,
                    dialect:% = recommendation.dialect,
                    confidence = recommendation.confidence;
                    "Classified transcript"
                );
                recommendation.dialect
            }
        };

        let mut request =
            GenerationRequest::new(transcript, dialect).with_keywords(&args.keywords);
        if let Some(summary) = &summary {
            request = request.with_summary(summary.as_str());
        }

        info!(request_id, input_path = transcript_path; "Processing transcript");
        let result = generator.generate(&request);

        if result.used_fallback() {
            warn!(
                request_id,
                status:% = result.status(),
                unresolved = result.unresolved_violations().len();
                "Returning fallback diagram: {}",
                result.status_message()
            );
        } else {
            info!(
                request_id,
                status:% = result.status(),
                attempts = result.attempts();
                "{}",
                result.status_message()
            );
        }

        let rendered = if args.json {
            serde_json::to_string_pretty(&result).map_err(io::Error::from)?
        } else {
            result.into_code()
        };

        let output = args
            .output
            .as_ref()
            .map(|base| sequence::output_path(Path::new(base), request_id, batch));
        write_output(output.as_deref(), &rendered)?;
    }

    Ok(())
}

fn normalize_file(args: &NormalizeArgs) -> Result<(), ScribeError> {
    let dialect: Dialect = args.dialect.parse()?;
    let source = fs::read_to_string(&args.input)?;

    let code = normalize(&source, dialect);
    debug!(input_path = args.input, dialect:% = dialect; "Normalized markup");

    let output = args.output.as_ref().map(PathBuf::from);
    write_output(output.as_deref(), &code)?;
    Ok(())
}

fn validate_file(args: &ValidateArgs) -> Result<(), ScribeError> {
    let dialect = args
        .dialect
        .as_deref()
        .map(str::parse::<Dialect>)
        .transpose()?;
    let source = fs::read_to_string(&args.input)?;

    let verdict = validate(&source, dialect);
    for advisory in verdict.advisories() {
        warn!(code:% = advisory.code(); "{}", advisory.message());
    }

    if !verdict.is_valid() {
        return Err(ScribeError::new_validation_error(verdict, source));
    }

    info!(input_path = args.input; "Markup is valid");
    println!("{}: valid", args.input);
    Ok(())
}

fn classify(args: &ClassifyArgs) -> Result<(), ScribeError> {
    let transcript = fs::read_to_string(&args.transcript)?;
    let classifier = DialectClassifier::new();

    let recommendations = match args.top {
        Some(k) => classifier.top(&transcript, k),
        None => vec![classifier.recommend(&transcript)],
    };

    for recommendation in &recommendations {
        println!(
            "{}\t{:.2}\t{}",
            recommendation.dialect.slug(),
            recommendation.confidence,
            recommendation.reasoning
        );
    }
    Ok(())
}

fn code(args: &CodeArgs, app_config: &AppConfig) -> Result<(), ScribeError> {
    let dialect = args
        .dialect
        .as_deref()
        .map(str::parse::<Dialect>)
        .transpose()?;
    let markup = fs::read_to_string(&args.input)?;

    let artifacts = ArtifactGenerator::new(HttpGenerator::new(app_config.llm())?);
    let artifact = artifacts.generate(&markup, dialect);

    if !artifact.success {
        return Err(ScribeError::Artifact(
            artifact
                .error
                .unwrap_or_else(|| "no usable code in model output".to_string()),
        ));
    }

    info!(input_path = args.input, language = artifact.language; "Code generated");
    let output = args.output.as_ref().map(PathBuf::from);
    write_output(output.as_deref(), &artifact.code)?;
    Ok(())
}

/// Writes `content` to `path`, or to stdout when there is no path.
fn write_output(path: Option<&Path>, content: &str) -> io::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, format!("{content}\n"))?;
            info!(output_file = path.display().to_string(); "Output written");
        }
        None => println!("{content}"),
    }
    Ok(())
}
