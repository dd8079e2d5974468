use clap::Parser;
use miette::{IntoDiagnostic, Result};
use tracing_subscriber::{fmt as tracing_fmt, prelude::*, EnvFilter};

use mcfg::cli::{Cli, Commands, GlobalOpts};

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
    init_tracing(&global)?;

    match cli.command {
        Commands::Init(args) => mcfg::cli::commands::init::run(args, &global),
        Commands::Catalog(cmd) => mcfg::cli::commands::catalog::run(cmd, &global),
        Commands::Bom(args) => mcfg::cli::commands::bom::run(args, &global),
        Commands::WhereUsed(args) => mcfg::cli::commands::where_used::run(args, &global),
        Commands::Completions(args) => mcfg::cli::commands::completions::run(args),
    }
}

/// Logs go to stderr; `MCFG_LOG` overrides the level picked by -v/-q
fn init_tracing(global: &GlobalOpts) -> Result<()> {
    let filter = if std::env::var_os("MCFG_LOG").is_some() {
        EnvFilter::try_from_env("MCFG_LOG").into_diagnostic()?
    } else {
        let level = if global.verbose {
            "debug"
        } else if global.quiet {
            "error"
        } else {
            "warn"
        };
        EnvFilter::new(format!("warn,mcfg={level}"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    Ok(())
}
