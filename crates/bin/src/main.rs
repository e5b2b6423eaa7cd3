mod cli;
mod commands;
mod output;

use std::process::ExitCode;

use cfgtree::{Tree, logging};
use clap::Parser;
use tracing::Dispatch;

use cli::{Cli, Commands, LoadArgs};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Commands::Get(args) => {
            let config = load_logged(&args.load, stderr_logger(&cli.log)?)?;
            let _log = init_tracing(cli, Some(&config))?;
            commands::get::run(&config, args, cli.format)
        }
        Commands::Tree(args) => {
            let config = load_logged(&args.load, stderr_logger(&cli.log)?)?;
            let _log = init_tracing(cli, Some(&config))?;
            commands::tree::run(&config, args, cli.format)
        }
        Commands::Digest(args) => {
            let _log = init_tracing(cli, None)?;
            commands::helpers::digest(args, cli.format)
        }
        Commands::Rand(args) => {
            let _log = init_tracing(cli, None)?;
            commands::helpers::rand(args, cli.format)
        }
    }
}

/// A stderr subscriber filtered by `--log` plus any `RUST_LOG` directives.
fn stderr_logger(directives: &str) -> Result<Dispatch, logging::LogError> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(logging::parse_filter(directives)?)
        .with_writer(std::io::stderr)
        .finish();
    Ok(Dispatch::new(subscriber))
}

/// Loads the configuration with `dispatch` as the active subscriber.
///
/// The global logger depends on the loaded configuration, so events raised
/// while reading files go to this scoped subscriber instead.
fn load_logged(args: &LoadArgs, dispatch: Dispatch) -> cfgtree::Result<Tree> {
    tracing::dispatcher::with_default(&dispatch, || commands::load_config(args))
}

/// Installs the file logger when `config` sets `log.file`, otherwise logs to stderr.
fn init_tracing(
    cli: &Cli,
    config: Option<&Tree>,
) -> Result<Option<logging::LogHandle>, Box<dyn std::error::Error>> {
    if let Some(config) = config.filter(|c| c.has(logging::FILE_KEY)) {
        let handle = logging::init(config)?;
        return Ok(Some(handle));
    }

    tracing::dispatcher::set_global_default(stderr_logger(&cli.log)?)?;
    Ok(None)
}
