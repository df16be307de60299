//! `rtk new` command - print a blank template entry

use miette::{miette, Result};

use crate::schema::{ScaffoldContext, ScaffoldGenerator};

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Title of the new template
    #[arg(long, short = 't')]
    pub title: String,

    /// Number of blank work experience entries
    #[arg(long, default_value_t = 1)]
    pub positions: usize,
}

pub fn run(args: NewArgs) -> Result<()> {
    if args.title.trim().is_empty() {
        return Err(miette!("Template title must not be empty"));
    }

    let generator = ScaffoldGenerator::new().map_err(|e| miette!("{}", e))?;
    let ctx = ScaffoldContext::new(args.title).with_positions(args.positions);
    let json = generator.generate(&ctx).map_err(|e| miette!("{}", e))?;
    print!("{}", json);
    Ok(())
}
