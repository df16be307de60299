//! `rtk validate` command - Validate template data files

use console::style;
use miette::Result;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

use crate::cli::helpers::plural;
use crate::cli::GlobalOpts;
use crate::core::loader::{sample_text, SAMPLE_FILE};
use crate::core::{load_value, Config, LoadError};
use crate::json::JsonSyntaxError;
use crate::schema::{ValidationIssue, Validator};

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Files or directories to validate (default: the configured data file)
    #[arg()]
    pub paths: Vec<PathBuf>,

    /// Strict mode - unknown fields and untrimmed text become errors
    #[arg(long)]
    pub strict: bool,

    /// Show summary only, don't show individual errors
    #[arg(long)]
    pub summary: bool,
}

/// Validation statistics
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ValidationStats {
    pub files_checked: usize,
    pub files_passed: usize,
    pub files_failed: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
}

/// Outcome for one document
#[derive(Debug)]
pub enum FileOutcome {
    Passed { templates: usize, warnings: Vec<ValidationIssue> },
    Failed { errors: usize, report: miette::Report },
}

/// Check one document's bytes without printing anything
///
/// Bytes that are not UTF-8 fail as a syntax error, as they do on load.
pub fn check_document(name: &str, bytes: &[u8], validator: &Validator, strict: bool) -> FileOutcome {
    let content = String::from_utf8_lossy(bytes);
    let value: serde_json::Value = match serde_json::from_slice(bytes) {
        Ok(v) => v,
        Err(e) => {
            return FileOutcome::Failed {
                errors: 1,
                report: miette::Report::new(JsonSyntaxError::from_serde_error(&e, &content, name)),
            }
        }
    };

    let warnings = if strict { validator.lint(&value) } else { Vec::new() };

    match load_value(name, &content, value) {
        Ok(collection) => FileOutcome::Passed {
            templates: collection.count(),
            warnings,
        },
        Err(LoadError::Validation(e)) => FileOutcome::Failed {
            errors: e.violation_count(),
            report: miette::Report::new(e),
        },
        Err(e) => FileOutcome::Failed {
            errors: 1,
            report: miette::Report::new(e),
        },
    }
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let strict = args.strict || config.strict();
    let validator = Validator::default();

    let mut stats = ValidationStats::default();

    // (display name, file path or None for the built-in samples)
    let targets: Vec<(String, Option<PathBuf>)> = if !args.paths.is_empty() {
        expand_paths(&args.paths)
            .into_iter()
            .map(|p| (p.display().to_string(), Some(p)))
            .collect()
    } else if let Some(path) = global.file.clone().or(config.data_file.clone()) {
        vec![(path.display().to_string(), Some(path))]
    } else {
        vec![(format!("{} (built-in)", SAMPLE_FILE), None)]
    };

    if !global.quiet {
        println!(
            "{} Validating {}...\n",
            style("→").blue(),
            plural(targets.len(), "file")
        );
    }

    for (name, path) in &targets {
        stats.files_checked += 1;

        let content = match read_target(path.as_deref()) {
            Ok(c) => c,
            Err(e) => {
                if !args.summary {
                    println!("{} {} - {}", style("✗").red(), name, e);
                }
                stats.files_failed += 1;
                stats.total_errors += 1;
                continue;
            }
        };

        match check_document(name, &content, &validator, strict) {
            FileOutcome::Passed { templates, warnings } if warnings.is_empty() => {
                stats.files_passed += 1;
                if !args.summary {
                    println!(
                        "{} {} ({})",
                        style("✓").green(),
                        name,
                        plural(templates, "template")
                    );
                }
            }
            FileOutcome::Passed { warnings, .. } => {
                // Warnings only exist in strict mode, where they fail the file
                stats.total_warnings += warnings.len();
                stats.files_failed += 1;
                for w in &warnings {
                    warn!(file = %name, "{}", w);
                }
                if !args.summary {
                    println!(
                        "{} {} - {}",
                        style("!").yellow(),
                        name,
                        plural(warnings.len(), "warning")
                    );
                    for w in &warnings {
                        println!("    {}", style(w).yellow());
                    }
                }
            }
            FileOutcome::Failed { errors, report } => {
                stats.files_failed += 1;
                stats.total_errors += errors;
                if !args.summary {
                    println!(
                        "{} {} - {}",
                        style("✗").red(),
                        name,
                        plural(errors, "error")
                    );
                    println!("{:?}", report);
                }
            }
        }
    }

    print_summary(&stats);

    if stats.files_failed > 0 {
        if stats.files_failed == 1 {
            Err(miette::miette!("Validation failed: 1 file has errors"))
        } else {
            Err(miette::miette!(
                "Validation failed: {} files have errors",
                stats.files_failed
            ))
        }
    } else {
        println!("{} All files passed validation!", style("✓").green().bold());
        Ok(())
    }
}

fn read_target(path: Option<&Path>) -> std::io::Result<Vec<u8>> {
    match path {
        Some(p) => std::fs::read(p),
        None => sample_text().map(String::into_bytes).ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "sample data not embedded")
        }),
    }
}

fn print_summary(stats: &ValidationStats) {
    println!();
    println!("{}", style("─".repeat(60)).dim());
    println!("{}", style("Validation Summary").bold());
    println!("{}", style("─".repeat(60)).dim());
    println!("  Files checked:  {}", style(stats.files_checked).cyan());
    println!("  Files passed:   {}", style(stats.files_passed).green());
    println!("  Files failed:   {}", style(stats.files_failed).red());
    println!("  Total errors:   {}", style(stats.total_errors).red());
    if stats.total_warnings > 0 {
        println!("  Total warnings: {}", style(stats.total_warnings).yellow());
    }
    println!();
}

/// Expand directories to the `.json` files beneath them
fn expand_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .filter(|p| p.extension().map_or(false, |ext| ext == "json"))
                .collect();
            found.sort();
            files.extend(found);
        } else {
            // Missing files are kept so they are reported as read failures
            files.push(path.clone());
        }
    }

    files
}
