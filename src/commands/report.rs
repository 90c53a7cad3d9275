use crate::config::DiagConfig;
use crate::output::output_data;
use crate::probes::collect_full_report;
use crate::state::collect_internal_state;

pub fn handle_report_command(
    config: Option<&str>,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = DiagConfig::resolve(config)?;
    let report = collect_full_report(&cfg);
    output_data(&report, format)?;
    Ok(())
}

pub fn handle_state_command(
    config: Option<&str>,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = DiagConfig::resolve(config)?;
    let state = collect_internal_state(&cfg);
    output_data(&state, format)?;
    Ok(())
}

pub fn handle_default_config_command() -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", DiagConfig::example_yaml());
    Ok(())
}
