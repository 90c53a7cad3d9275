use crate::config::DiagConfig;
use crate::probes::types::InternalState;
use crate::state::datastore::{inspect_datastore, SqliteCli};
use crate::state::services::{collect_service_states, SystemdSupervisor};
use std::time::Duration;

/// Assemble the appliance's internal-state section: datastore health plus
/// the liveness of every expected service.
pub fn collect_internal_state(cfg: &DiagConfig) -> InternalState {
    let timeout = Duration::from_secs(cfg.command_timeout_secs);
    let counter = SqliteCli::new(timeout);
    let supervisor = SystemdSupervisor::new(timeout);

    InternalState {
        db: inspect_datastore(&counter, &cfg.db_path, &cfg.tables),
        services: collect_service_states(&supervisor, &cfg.services),
    }
}
