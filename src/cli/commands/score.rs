//! `rtk score` command - rank templates, optionally against a job description

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::cli::commands::utils::{load_collection, resolve_format};
use crate::cli::helpers::truncate_str;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Ranker, Ranking};

const HEADERS: [&str; 7] = ["#", "TITLE", "OVERALL", "KEYWORDS", "FORMATTING", "CONTENT", "RULES"];

#[derive(clap::Args, Debug)]
pub struct ScoreArgs {
    /// Score only the template with this exact title
    pub title: Option<String>,

    /// Job description file to score against
    #[arg(long, short = 'j')]
    pub job_description: Option<PathBuf>,
}

pub fn run(args: ScoreArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let collection = load_collection(global, &config)?;

    let job_description = match &args.job_description {
        Some(path) => Some(std::fs::read_to_string(path).map_err(|e| {
            miette::miette!("Failed to read job description {}: {}", path.display(), e)
        })?),
        None => None,
    };
    let ranker = Ranker::new(job_description.as_deref());

    let rankings = match &args.title {
        Some(title) => {
            let template = collection.by_title(title).ok_or_else(|| {
                miette::miette!(
                    help = "Run `rtk list --format id` to see available titles",
                    "No template titled '{}' in {}",
                    title,
                    collection.source_name()
                )
            })?;
            vec![ranker.rank(template)]
        }
        None => ranker.rank_all(collection.all()),
    };

    let format = resolve_format(global, &config);
    print!("{}", render(&rankings, format)?);

    if matches!(format, OutputFormat::Auto | OutputFormat::Md) && !global.quiet {
        print_feedback(&rankings);
    }
    Ok(())
}

fn percent(score: Option<f64>) -> String {
    score.map_or_else(|| "-".to_string(), |s| format!("{:.1}", s))
}

fn row(rank: usize, r: &Ranking) -> [String; 7] {
    [
        (rank + 1).to_string(),
        r.template_title.clone(),
        percent(Some(r.overall_score)),
        percent(r.scores.keyword_relevance),
        percent(Some(r.scores.formatting)),
        percent(r.scores.content_quality),
        r.scores.rule_score.to_string(),
    ]
}

/// Render rankings, best first, in the requested format
pub fn render(rankings: &[Ranking], format: OutputFormat) -> Result<String> {
    let rows: Vec<[String; 7]> = rankings.iter().enumerate().map(|(i, r)| row(i, r)).collect();

    let out = match format {
        OutputFormat::Id => rankings
            .iter()
            .map(|r| format!("{}\n", r.template_title))
            .collect::<String>(),
        OutputFormat::Json => {
            let mut s = serde_json::to_string_pretty(rankings).into_diagnostic()?;
            s.push('\n');
            s
        }
        OutputFormat::Yaml => serde_yml::to_string(&rankings).into_diagnostic()?,
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

fn print_feedback(rankings: &[Ranking]) {
    for r in rankings {
        println!("\n{}", style(&r.template_title).bold());
        for (topic, advice) in &r.feedback {
            println!("  {} {}: {}", style("•").cyan(), topic, advice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::load_samples;

    fn rankings(job: Option<&str>) -> Vec<Ranking> {
        let c = load_samples().unwrap();
        Ranker::new(job).rank_all(c.all())
    }

    #[test]
    fn test_csv_marks_missing_scores() {
        let out = render(&rankings(None), OutputFormat::Csv).unwrap();
        let mut reader = csv::Reader::from_reader(out.as_bytes());
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 3);
        assert_eq!(&records[0][0], "1");
        assert_eq!(&records[0][3], "-");
        assert_eq!(&records[0][5], "-");
    }

    #[test]
    fn test_id_lists_best_first() {
        let out = render(
            &rankings(Some("Data analyst with SQL, Tableau and Excel reporting skills")),
            OutputFormat::Id,
        )
        .unwrap();
        assert_eq!(out.lines().next(), Some("Data Analyst Resume"));
    }

    #[test]
    fn test_json_includes_feedback() {
        let out = render(&rankings(None), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(value[0]["feedback"].is_object());
        assert!(value[0]["scores"].get("keyword_relevance").is_none());
    }
}
