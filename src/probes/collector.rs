use crate::config::DiagConfig;
use crate::probes;
use crate::probes::types::DiagReport;
use crate::state::collect_internal_state;
use chrono::Utc;
use std::time::Duration;

const COLLECTOR_VERSION: &str = "1.0.0";

pub fn collect_full_report(cfg: &DiagConfig) -> DiagReport {
    let timeout = Duration::from_secs(cfg.command_timeout_secs);

    let accounts = probes::collect_accounts_info(timeout);
    let os = probes::collect_os_info(timeout);
    let hardware = probes::collect_hardware_info();
    let network = probes::collect_network_info();
    let dependencies = probes::collect_dependency_info(&cfg.dependencies, timeout);
    let internal_state = collect_internal_state(cfg);

    DiagReport {
        collector_version: COLLECTOR_VERSION.to_string(),
        collected_at: Utc::now().to_rfc3339(),
        accounts,
        os,
        hardware,
        network,
        dependencies,
        internal_state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn report_always_carries_every_section() {
        let mut cfg = DiagConfig::default();
        cfg.db_path = PathBuf::from("/no/such/scanner.sqlite3");
        cfg.command_timeout_secs = 2;

        let report = collect_full_report(&cfg);
        let value = serde_json::to_value(&report).expect("report must serialize");
        for key in [
            "accounts",
            "os",
            "hardware",
            "network",
            "dependencies",
            "internal_state",
        ] {
            assert!(value.get(key).is_some(), "missing section {key}");
        }

        assert!(!report.internal_state.db.available);
        assert!(report.internal_state.db.records.is_empty());
        assert_eq!(report.internal_state.services.len(), cfg.services.len());
    }
}
