//! `rtk completions` command - shell completion scripts
//!
//! ```bash
//! rtk completions bash > ~/.local/share/bash-completion/completions/rtk
//! rtk completions fish > ~/.config/fish/completions/rtk.fish
//! ```

use clap::CommandFactory;
use clap_complete::Shell;
use miette::Result;

use crate::cli::Cli;

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    clap_complete::generate(args.shell, &mut cmd, bin, &mut std::io::stdout());
    Ok(())
}
