//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, config::ConfigCommands, new::NewArgs, schema::SchemaArgs,
    score::ScoreArgs, show::ShowArgs, validate::ValidateArgs,
};

#[derive(Parser)]
#[command(name = "rtk")]
#[command(author, version, about = "Resume Template Kit")]
#[command(long_about = "Load, validate and browse collections of example resume templates stored as JSON.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Template data file (default: configured file, then the built-in samples)
    #[arg(long = "file", short = 'd', global = true)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate template data files
    Validate(ValidateArgs),

    /// List templates in file order
    List,

    /// Show one template by its exact title
    Show(ShowArgs),

    /// Print the number of templates
    Count,

    /// Per-section entry counts for each template
    Stats,

    /// Rank templates by section coverage, or against a job description
    Score(ScoreArgs),

    /// Show the JSON Schema of the data file format
    Schema(SchemaArgs),

    /// Print a blank template entry to fill in
    New(NewArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (text for show, table for list)
    #[default]
    Auto,
    /// YAML format
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (full fidelity)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just titles, one per line
    Id,
}
