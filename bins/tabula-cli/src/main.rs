mod config;
mod error;
mod render;

use clap::Parser;
use config::{Cli, Commands};

mod cmd;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Convert => cmd::convert::run(&cli.global),
        Commands::Row(args) => cmd::row::run(&cli.global, args),
        Commands::Bind(args) => cmd::bind::run(&cli.global, args),
    };
    if let Err(e) = result {
        tracing::error!(error = %e, "tabula failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
