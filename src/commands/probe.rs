use crate::cli::ProbeCommands;
use crate::config::DiagConfig;
use crate::output::output_data;
use crate::probes::{
    collect_accounts_info, collect_dependency_info, collect_hardware_info, collect_network_info,
    collect_os_info,
};
use std::time::Duration;

pub fn handle_probe_command(cmd: &ProbeCommands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ProbeCommands::Accounts { format } => {
            let accounts = collect_accounts_info(default_timeout());
            output_data(&accounts, format)?;
        }
        ProbeCommands::Os { format } => {
            let os_info = collect_os_info(default_timeout());
            output_data(&os_info, format)?;
        }
        ProbeCommands::Hardware { format } => {
            let hardware_info = collect_hardware_info();
            output_data(&hardware_info, format)?;
        }
        ProbeCommands::Network { format } => {
            let network_info = collect_network_info();
            output_data(&network_info, format)?;
        }
        ProbeCommands::Deps { config, format } => {
            let cfg = DiagConfig::resolve(config.as_deref())?;
            let dependencies = collect_dependency_info(
                &cfg.dependencies,
                Duration::from_secs(cfg.command_timeout_secs),
            );
            output_data(&dependencies, format)?;
        }
    }
    Ok(())
}

fn default_timeout() -> Duration {
    Duration::from_secs(DiagConfig::default().command_timeout_secs)
}
