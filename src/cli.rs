use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "scanner-doctor")]
#[command(about = "Host diagnostics collector for scanner appliances")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect the full diagnostics report
    Report {
        /// Path to the collector configuration file
        #[arg(short, long)]
        config: Option<String>,

        /// Output format (json, yaml, or pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },

    /// Inspect the appliance datastore and expected services
    State {
        /// Path to the collector configuration file
        #[arg(short, long)]
        config: Option<String>,

        /// Output format (json, yaml, or pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },

    /// Run a single host probe
    #[command(subcommand)]
    Probe(ProbeCommands),

    /// Print the default configuration as YAML
    DefaultConfig,
}

#[derive(Subcommand)]
pub enum ProbeCommands {
    /// Collect account and session information
    Accounts {
        /// Output format (json, yaml, or pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },

    /// Collect operating system identity
    Os {
        /// Output format (json, yaml, or pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },

    /// Collect hardware facts
    Hardware {
        /// Output format (json, yaml, or pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },

    /// Collect network interface counters
    Network {
        /// Output format (json, yaml, or pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },

    /// Collect installed dependency versions
    Deps {
        /// Path to the collector configuration file
        #[arg(short, long)]
        config: Option<String>,

        /// Output format (json, yaml, or pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
}
