pub mod probe;
pub mod report;

pub use probe::handle_probe_command;
pub use report::{handle_default_config_command, handle_report_command, handle_state_command};
