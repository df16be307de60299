//! Shared utilities for CLI commands

use clap::ValueEnum;
use miette::Result;
use tracing::{debug, warn};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{load_path, load_samples, Config, ResumeTemplateCollection};

/// Load the collection selected by `--file`, the config, or the built-in samples
pub fn load_collection(global: &GlobalOpts, config: &Config) -> Result<ResumeTemplateCollection> {
    let collection = match global.file.as_ref().or(config.data_file.as_ref()) {
        Some(path) => {
            debug!(path = %path.display(), "loading templates from file");
            load_path(path)?
        }
        None => {
            debug!("loading built-in sample templates");
            load_samples()?
        }
    };
    Ok(collection)
}

/// Effective output format: explicit `--format`, else the configured default
pub fn resolve_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    if global.format != OutputFormat::Auto {
        return global.format;
    }
    match config.default_format.as_deref() {
        Some(name) => OutputFormat::from_str(name, true).unwrap_or_else(|_| {
            warn!(format = name, "ignoring unknown default_format in config");
            OutputFormat::Auto
        }),
        None => OutputFormat::Auto,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(format: OutputFormat) -> GlobalOpts {
        GlobalOpts {
            format,
            quiet: false,
            verbose: false,
            file: None,
        }
    }

    #[test]
    fn test_resolve_format() {
        let config = Config {
            default_format: Some("JSON".into()),
            ..Config::default()
        };
        assert_eq!(resolve_format(&global(OutputFormat::Auto), &config), OutputFormat::Json);
        assert_eq!(resolve_format(&global(OutputFormat::Yaml), &config), OutputFormat::Yaml);

        let bad = Config {
            default_format: Some("pdf".into()),
            ..Config::default()
        };
        assert_eq!(resolve_format(&global(OutputFormat::Auto), &bad), OutputFormat::Auto);
    }

    #[test]
    fn test_load_collection_defaults_to_samples() {
        let c = load_collection(&global(OutputFormat::Auto), &Config::default()).unwrap();
        assert_eq!(c.count(), 3);
    }
}
