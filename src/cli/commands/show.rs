//! `rtk show` command - one template by title

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fmt::Write;

use crate::cli::commands::utils::{load_collection, resolve_format};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::entities::ResumeTemplate;

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Exact template title (case-sensitive)
    pub title: String,
}

pub fn run(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let collection = load_collection(global, &config)?;

    let Some(template) = collection.by_title(&args.title) else {
        let available = collection.titles().collect::<Vec<_>>().join(", ");
        return Err(miette::miette!(
            help = format!("Available titles: {}", available),
            "No template titled '{}' in {}",
            args.title,
            collection.source_name()
        ));
    };

    match resolve_format(global, &config) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(template).into_diagnostic()?)
        }
        OutputFormat::Yaml => print!("{}", serde_yml::to_string(template).into_diagnostic()?),
        OutputFormat::Id => println!("{}", template.template_title),
        _ => print!("{}", render_text(template)),
    }
    Ok(())
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", style(title).bold());
}

fn bullets(out: &mut String, items: &[String]) {
    if items.is_empty() {
        let _ = writeln!(out, "  {}", style("(none)").dim());
    }
    for item in items {
        let _ = writeln!(out, "  - {}", item);
    }
}

/// Human-readable rendering of a template
pub fn render_text(t: &ResumeTemplate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", style(&t.template_title).cyan().bold());
    let _ = writeln!(out, "{}", "=".repeat(t.template_title.chars().count()));
    let _ = writeln!(out, "{}", t.personal_info_example);

    heading(&mut out, "Career Objective");
    let _ = writeln!(out, "  {}", t.career_objective_example);

    heading(&mut out, "Technical Skills");
    bullets(&mut out, &t.skills_example.technical_skills);
    heading(&mut out, "Soft Skills");
    bullets(&mut out, &t.skills_example.soft_skills);
    heading(&mut out, "Tools");
    bullets(&mut out, &t.skills_example.tools);

    heading(&mut out, "Work Experience");
    for w in &t.work_experience_example {
        let _ = writeln!(
            out,
            "  {} - {}, {} ({} to {})",
            w.job_title, w.company_name, w.location, w.start_date, w.end_date
        );
        for r in &w.responsibilities {
            let _ = writeln!(out, "    * {}", r);
        }
    }

    heading(&mut out, "Education");
    let _ = writeln!(out, "  {}", t.education_example);

    heading(&mut out, "Certifications");
    for c in &t.certifications_example {
        let _ = writeln!(
            out,
            "  - {} ({}, {})",
            c.certification_title, c.issuing_organization, c.issue_date
        );
    }

    heading(&mut out, "Projects");
    for p in &t.projects_example {
        let _ = writeln!(out, "  - {}: {}", p.project_name, p.description);
        if !p.technologies_used.is_empty() {
            let _ = writeln!(out, "    [{}]", p.technologies_used.join(", "));
        }
    }

    heading(&mut out, "Languages");
    bullets(&mut out, &t.languages_example);

    heading(&mut out, "Awards");
    for a in &t.awards_example {
        let _ = writeln!(out, "  - {} ({}, {})", a.award_title, a.awarding_body, a.date_received);
    }

    heading(&mut out, "Interests");
    bullets(&mut out, &t.interests_example);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::load_samples;

    #[test]
    fn test_render_text_includes_sections() {
        let c = load_samples().unwrap();
        let t = c.by_title("Creative Graphic Designer Resume").unwrap();
        let text = render_text(t);
        assert!(text.contains("Creative Graphic Designer Resume"));
        assert!(text.contains("Work Experience"));
        assert!(text.contains("Bright Studio"));
        assert!(text.contains("Figma"));
    }
}
