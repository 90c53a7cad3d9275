use crate::exec::run_with_timeout;
use crate::probes::types::{DistInfo, OsInfo};
use std::time::Duration;
use sysinfo::System;
use tracing::debug;

pub fn collect_os_info(timeout: Duration) -> OsInfo {
    OsInfo {
        system: family_name().to_string(),
        release: System::kernel_version().unwrap_or_default(),
        version: System::os_version().unwrap_or_default(),
        platform: System::long_os_version().unwrap_or_default(),
        dist: detect_dist(timeout),
    }
}

fn family_name() -> &'static str {
    match std::env::consts::OS {
        "linux" => "Linux",
        "windows" => "Windows",
        "macos" => "Darwin",
        other => other,
    }
}

#[cfg(target_os = "linux")]
fn detect_dist(timeout: Duration) -> Option<DistInfo> {
    let output = match run_with_timeout("getconf", &["GNU_LIBC_VERSION"], timeout) {
        Ok(out) if out.status.success() => out,
        Ok(_) | Err(_) => {
            debug!("libc identification unavailable");
            return None;
        }
    };
    parse_libc_version(&String::from_utf8_lossy(&output.stdout))
}

/// `getconf GNU_LIBC_VERSION` prints e.g. `glibc 2.31`.
#[cfg(target_os = "linux")]
fn parse_libc_version(raw: &str) -> Option<DistInfo> {
    let mut parts = raw.split_whitespace();
    let lib = parts.next()?;
    let version = parts.next()?;
    Some(DistInfo::Linux {
        lib: lib.to_string(),
        version: version.to_string(),
    })
}

#[cfg(windows)]
fn detect_dist(_timeout: Duration) -> Option<DistInfo> {
    Some(DistInfo::Windows {
        release: System::os_version().unwrap_or_default(),
        version: System::kernel_version().unwrap_or_default(),
        build: System::long_os_version().unwrap_or_default(),
    })
}

#[cfg(not(any(target_os = "linux", windows)))]
fn detect_dist(_timeout: Duration) -> Option<DistInfo> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_identity_fields_are_always_present() {
        let os = collect_os_info(Duration::from_secs(5));
        assert!(!os.system.is_empty());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn parses_libc_identification() {
        match parse_libc_version("glibc 2.31\n") {
            Some(DistInfo::Linux { lib, version }) => {
                assert_eq!(lib, "glibc");
                assert_eq!(version, "2.31");
            }
            _ => panic!("expected a libc descriptor"),
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn rejects_empty_libc_output() {
        assert!(parse_libc_version("").is_none());
        assert!(parse_libc_version("glibc").is_none());
    }
}
