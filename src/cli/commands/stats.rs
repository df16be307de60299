//! `rtk stats` command - section counts per template

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::cli::commands::utils::{load_collection, resolve_format};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::entities::SectionCounts;

#[derive(Serialize)]
struct TemplateStats<'a> {
    template_title: &'a str,
    sections: SectionCounts,
    complete: bool,
}

pub fn run(global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let collection = load_collection(global, &config)?;

    let stats: Vec<TemplateStats<'_>> = collection
        .iter()
        .map(|t| TemplateStats {
            template_title: &t.template_title,
            sections: t.section_counts(),
            complete: t.is_complete(),
        })
        .collect();

    match resolve_format(global, &config) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats).into_diagnostic()?)
        }
        OutputFormat::Yaml => print!("{}", serde_yml::to_string(&stats).into_diagnostic()?),
        format => {
            let mut builder = Builder::default();
            let mut header = vec!["TITLE".to_string()];
            header.extend(SectionCounts::default().entries().iter().map(|(n, _)| n.to_uppercase()));
            builder.push_record(header);

            for s in &stats {
                let mut record = vec![s.template_title.to_string()];
                record.extend(s.sections.entries().iter().map(|(_, c)| c.to_string()));
                builder.push_record(record);
            }

            let mut table = builder.build();
            if format == OutputFormat::Md {
                table.with(Style::markdown());
            } else {
                table.with(Style::sharp());
            }
            println!("{}", table);

            if !global.quiet {
                for s in stats.iter().filter(|s| !s.complete) {
                    println!(
                        "{} {} has empty sections: {}",
                        style("!").yellow(),
                        s.template_title,
                        s.sections.empty_sections().join(", ")
                    );
                }
            }
        }
    }
    Ok(())
}
