//! CLI entry point - the composition root.
//!
//! This is the ONLY place where infrastructure is wired together via bootstrap.
//! Command dispatch routes to handlers which delegate to the configuration
//! service and the supervisor.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use launcher_cli::handlers::run::RunArgs;
use launcher_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

/// Filter applied with `--verbose` when `RUST_LOG` is unset.
const VERBOSE_FILTER: &str = "launcher_core=debug,launcher_runtime=debug,launcher_cli=debug";

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before clap reads its `env` fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { VERBOSE_FILTER } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Bootstrap the CLI context (composition root)
    let config = CliConfig::with_defaults(cli.settings, cli.bundle_dir)?;
    let ctx = bootstrap(config);

    // No subcommand behaves like opening the launcher app
    let command = cli.command.unwrap_or(Commands::Run {
        start: false,
        no_auto_start: false,
    });

    match command {
        Commands::Run {
            start,
            no_auto_start,
        } => {
            handlers::run::execute(
                &ctx,
                RunArgs {
                    start,
                    no_auto_start,
                },
            )
            .await?;
        }
        Commands::Paths => {
            handlers::paths::execute(&ctx).await?;
        }
        Commands::Config { command } => {
            handlers::config::execute(&ctx, command).await?;
        }
        Commands::Open { target } => {
            handlers::open::execute(&ctx, target).await?;
        }
    }

    Ok(())
}
