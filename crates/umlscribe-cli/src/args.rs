//! Command-line argument definitions for the umlscribe CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Each subcommand maps to one library operation; the
//! configuration file and logging verbosity are global.

use clap::{Parser, Subcommand};

/// Command-line arguments for the umlscribe diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate diagrams from meeting transcripts
    Generate(GenerateArgs),
    /// Clean up PlantUML markup
    Normalize(NormalizeArgs),
    /// Check PlantUML markup against a dialect's grammar
    Validate(ValidateArgs),
    /// Recommend a diagram type for a transcript
    Classify(ClassifyArgs),
    /// Generate Java or SQL code from diagram markup
    Code(CodeArgs),
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Transcript files, one diagram per file
    #[arg(required = true)]
    pub transcripts: Vec<String>,

    /// Diagram type, or `auto` to classify each transcript
    #[arg(short, long, default_value = "auto")]
    pub dialect: String,

    /// Keyword that guides the model (repeatable)
    #[arg(short, long = "keyword")]
    pub keywords: Vec<String>,

    /// File holding a summary of the transcript
    #[arg(short, long)]
    pub summary: Option<String>,

    /// Output file; numbered per transcript when several are given
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write the full generation result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct NormalizeArgs {
    /// Markup file
    pub input: String,

    /// Diagram type
    #[arg(short, long)]
    pub dialect: String,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Markup file
    pub input: String,

    /// Diagram type; only delimiters are checked when omitted
    #[arg(short, long)]
    pub dialect: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ClassifyArgs {
    /// Transcript file
    pub transcript: String,

    /// Number of ranked recommendations to print
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct CodeArgs {
    /// Markup file
    pub input: String,

    /// Diagram type; the model picks the target language when omitted
    #[arg(short, long)]
    pub dialect: Option<String>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<String>,
}
