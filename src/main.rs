use clap::Parser;
use miette::Result;
use rtk::cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log filter variable, e.g. `RTK_LOG=rtk=debug`
const LOG_ENV: &str = "RTK_LOG";

fn init_logging(verbose: bool) {
    let default = if verbose { "rtk=debug" } else { "rtk=warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_logging(global.verbose);

    match cli.command {
        Commands::Validate(args) => rtk::cli::commands::validate::run(args, &global),
        Commands::List => rtk::cli::commands::list::run(&global),
        Commands::Show(args) => rtk::cli::commands::show::run(args, &global),
        Commands::Count => rtk::cli::commands::count::run(&global),
        Commands::Stats => rtk::cli::commands::stats::run(&global),
        Commands::Score(args) => rtk::cli::commands::score::run(args, &global),
        Commands::Schema(args) => rtk::cli::commands::schema::run(args),
        Commands::New(args) => rtk::cli::commands::new::run(args),
        Commands::Config(cmd) => rtk::cli::commands::config::run(cmd),
        Commands::Completions(args) => rtk::cli::commands::completions::run(args),
    }
}
