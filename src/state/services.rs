use crate::exec::run_with_timeout;
use crate::probes::types::ServiceStatus;
use std::collections::BTreeMap;
use std::io;
use std::time::Duration;
use tracing::warn;

/// Exit code `systemctl status` uses for a unit the manager does not know.
const UNIT_NOT_FOUND_EXIT: i32 = 4;
/// Stderr marker kept as a compatibility shim for older service managers.
const NOT_FOUND_MARKER: &str = "could not be found";
/// Exit status reported when the service manager itself cannot be queried.
const LOOKUP_FAILED_EXIT: i32 = -1;

pub struct UnitDescription {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Liveness and status queries against the host service manager.
pub trait ServiceSupervisor {
    /// Exit code of the activity probe; 0 means the unit is active.
    fn is_active(&self, unit: &str) -> io::Result<i32>;
    /// Human-readable status of a unit that is not active.
    fn describe(&self, unit: &str) -> io::Result<UnitDescription>;
}

/// Default supervisor backed by `systemctl`.
pub struct SystemdSupervisor {
    timeout: Duration,
}

impl SystemdSupervisor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl ServiceSupervisor for SystemdSupervisor {
    fn is_active(&self, unit: &str) -> io::Result<i32> {
        let output = run_with_timeout("systemctl", &["is-active", "--quiet", unit], self.timeout)?;
        Ok(output.status.code().unwrap_or(LOOKUP_FAILED_EXIT))
    }

    fn describe(&self, unit: &str) -> io::Result<UnitDescription> {
        let output = run_with_timeout("systemctl", &["status", unit], self.timeout)?;
        Ok(UnitDescription {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Check one unit. Lookup failures degrade to a not-running status with an
/// explanatory detail; the report is produced either way.
pub fn check_service(supervisor: &dyn ServiceSupervisor, unit: &str) -> ServiceStatus {
    let exit_status = match supervisor.is_active(unit) {
        Ok(code) => code,
        Err(err) => {
            warn!(unit = %unit, error = %err, "service manager activity query failed");
            return ServiceStatus {
                running: false,
                exit_status: LOOKUP_FAILED_EXIT,
                detail: format!("failed to query service manager: {err}"),
            };
        }
    };

    let running = exit_status == 0;
    let detail = if running {
        String::new()
    } else {
        describe_stopped_unit(supervisor, unit)
    };

    ServiceStatus {
        running,
        exit_status,
        detail,
    }
}

fn describe_stopped_unit(supervisor: &dyn ServiceSupervisor, unit: &str) -> String {
    match supervisor.describe(unit) {
        Ok(desc) if unit_is_unknown(&desc) => "Service not found".to_string(),
        Ok(desc) => desc.stdout,
        Err(err) => {
            warn!(unit = %unit, error = %err, "service status query failed");
            format!("failed to query service status: {err}")
        }
    }
}

/// Unknown units are signaled by the structured status exit code; the stderr
/// text match covers managers that predate it.
fn unit_is_unknown(desc: &UnitDescription) -> bool {
    desc.exit_code == Some(UNIT_NOT_FOUND_EXIT) || desc.stderr.contains(NOT_FOUND_MARKER)
}

/// Check every configured alias; one failing unit never blocks the rest.
pub fn collect_service_states(
    supervisor: &dyn ServiceSupervisor,
    services: &BTreeMap<String, String>,
) -> BTreeMap<String, ServiceStatus> {
    services
        .iter()
        .map(|(alias, unit)| (alias.clone(), check_service(supervisor, unit)))
        .collect()
}
