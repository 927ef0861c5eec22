mod cli;
mod commands;
mod engine;
mod error;
mod metadata;
mod storage;
mod types;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = cli::Cli::parse();

    if let Err(message) = cli.command.arguments().validate() {
        eprintln!("{}", message.red());
        std::process::exit(2);
    }

    let result = match &cli.command {
        cli::Command::Generate(args) => commands::run_generate(args),
        cli::Command::Iterate(args) => commands::run_iterate(args),
        cli::Command::Scaffold(args) => commands::run_scaffold(args),
        cli::Command::Status(args) => commands::run_status(args),
    };

    if let Err(err) = result {
        eprintln!("{}", format!("Error: {err}").red());
        std::process::exit(1);
    }
}
