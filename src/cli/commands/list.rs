//! `rtk list` command - templates in file order

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::commands::utils::{load_collection, resolve_format};
use crate::cli::helpers::{plural, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, ResumeTemplateCollection};
use crate::entities::{ResumeTemplate, TemplateDocument};

const HEADERS: [&str; 6] = ["#", "TITLE", "CURRENT ROLE", "EXPERIENCE", "PROJECTS", "CERTIFICATIONS"];

/// One table row per template
fn row(index: usize, t: &ResumeTemplate) -> [String; 6] {
    let counts = t.section_counts();
    let current = t
        .current_positions()
        .next()
        .map(|w| w.job_title.clone())
        .unwrap_or_else(|| "-".to_string());
    [
        index.to_string(),
        t.template_title.clone(),
        current,
        counts.work_experience.to_string(),
        counts.projects.to_string(),
        counts.certifications.to_string(),
    ]
}

pub fn run(global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let collection = load_collection(global, &config)?;
    let format = resolve_format(global, &config);
    print!("{}", render(&collection, format)?);

    if format == OutputFormat::Auto && !global.quiet {
        println!(
            "\n{} in {}",
            style(plural(collection.count(), "template")).cyan(),
            collection.source_name()
        );
    }
    Ok(())
}

/// Render the listing in the requested format
pub fn render(collection: &ResumeTemplateCollection, format: OutputFormat) -> Result<String> {
    let rows: Vec<[String; 6]> = collection.iter().enumerate().map(|(i, t)| row(i, t)).collect();

    let out = match format {
        OutputFormat::Id => collection.titles().map(|t| format!("{}\n", t)).collect::<String>(),
        OutputFormat::Json => {
            let doc = TemplateDocument {
                resume_templates: collection.all().to_vec(),
            };
            let mut s = serde_json::to_string_pretty(&doc).into_diagnostic()?;
            s.push('\n');
            s
        }
        OutputFormat::Yaml => {
            let doc = TemplateDocument {
                resume_templates: collection.all().to_vec(),
            };
            serde_yml::to_string(&doc).into_diagnostic()?
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(HEADERS).into_diagnostic()?;
            for r in &rows {
                writer.write_record(r).into_diagnostic()?;
            }
            let bytes = writer.into_inner().into_diagnostic()?;
            String::from_utf8(bytes).into_diagnostic()?
        }
        OutputFormat::Tsv => {
            let mut s = HEADERS.join("\t");
            s.push('\n');
            for r in &rows {
                s.push_str(&r.join("\t"));
                s.push('\n');
            }
            s
        }
        OutputFormat::Md | OutputFormat::Auto => {
            let mut builder = Builder::default();
            builder.push_record(HEADERS);
            for r in &rows {
                let mut r = r.clone();
                if format == OutputFormat::Auto {
                    r[1] = truncate_str(&r[1], 40);
                }
                builder.push_record(r);
            }
            let mut table = builder.build();
            if format == OutputFormat::Md {
                table.with(Style::markdown());
            } else {
                table.with(Style::sharp());
            }
            format!("{}\n", table)
        }
    };
    Ok(out)
}
