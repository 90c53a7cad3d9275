mod cli;
mod commands;
mod config;
mod exec;
mod output;
mod probes;
mod state;

use clap::Parser;
use cli::{Cli, Commands};
use commands::{
    handle_default_config_command,
    handle_probe_command,
    handle_report_command,
    handle_state_command,
};
use output::print_error;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Report { config, format } => handle_report_command(config.as_deref(), format),
        Commands::State { config, format } => handle_state_command(config.as_deref(), format),
        Commands::Probe(cmd) => handle_probe_command(cmd),
        Commands::DefaultConfig => handle_default_config_command(),
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
