use clap::Parser;
use livecheck::{
    Cli, Command,
    handlers::{handle_added, handle_run, handle_strict_types, handle_targets, handle_versions},
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Command::Targets(args) => handle_targets(&cli, args),
        Command::Added(args) => handle_added(&cli, args),
        Command::Versions(args) => handle_versions(&cli, args),
        Command::StrictTypes(args) => handle_strict_types(&cli, args),
        Command::Run(args) => handle_run(&cli, args),
    };
    result.into()
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
