//! `rtk config` command - Configuration inspection

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration values
    Show,

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

pub fn run(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(),
        ConfigCommands::Path => path(),
        ConfigCommands::Keys => keys(),
    }
}

fn show() -> Result<()> {
    let config = Config::load();
    if config == Config::default() {
        println!("{}", style("(no configuration set)").dim());
        return Ok(());
    }
    print!("{}", serde_yml::to_string(&config).into_diagnostic()?);
    Ok(())
}

fn path() -> Result<()> {
    let mark = |exists: bool| {
        if exists {
            style("(exists)").green()
        } else {
            style("(not found)").dim()
        }
    };

    match Config::global_config_path() {
        Some(p) => println!("global:  {} {}", p.display(), mark(p.exists())),
        None => println!("global:  {}", style("(no home directory)").dim()),
    }
    let project = Config::project_config_path();
    println!("project: {} {}", project.display(), mark(project.exists()));
    Ok(())
}

fn keys() -> Result<()> {
    let keys = [
        ("data_file", "RTK_DATA_FILE", "Template data file used when --file is not given"),
        ("default_format", "RTK_FORMAT", "Default output format (json, yaml, tsv, csv, md, id)"),
        ("strict", "RTK_STRICT", "Treat lint warnings as errors in `rtk validate`"),
    ];
    println!("{:<16} {:<14} {}", "KEY", "ENV", "DESCRIPTION");
    for (key, env, desc) in keys {
        println!("{:<16} {:<14} {}", key, env, desc);
    }
    Ok(())
}
