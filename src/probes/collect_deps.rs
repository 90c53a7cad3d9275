use crate::exec::run_with_timeout;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

const PIP_CANDIDATES: [&str; 2] = ["pip3", "pip"];

/// Entry point: report the installed version of every allow-listed runtime
/// package. Packages that are not installed are simply absent.
pub fn collect_dependency_info(
    allow_list: &[String],
    timeout: Duration,
) -> BTreeMap<String, String> {
    let Some(listing) = installed_packages(timeout) else {
        debug!("package listing unavailable");
        return BTreeMap::new();
    };
    filter_installed(&listing, allow_list)
}

fn installed_packages(timeout: Duration) -> Option<String> {
    for pip in PIP_CANDIDATES {
        match run_with_timeout(
            pip,
            &["list", "--format=freeze", "--disable-pip-version-check"],
            timeout,
        ) {
            Ok(out) if out.status.success() => {
                return Some(String::from_utf8_lossy(&out.stdout).into_owned());
            }
            Ok(_) | Err(_) => continue,
        }
    }
    None
}

/// Filter `name==version` freeze lines down to the configured allow-list.
fn filter_installed(listing: &str, allow_list: &[String]) -> BTreeMap<String, String> {
    let mut dependencies = BTreeMap::new();
    for line in listing.lines() {
        let Some((name, version)) = line.trim().split_once("==") else {
            continue;
        };
        if allow_list.iter().any(|allowed| allowed == name) {
            dependencies.insert(name.to_string(), version.to_string());
        }
    }
    dependencies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_to_the_allow_list() {
        let listing = "flask-cors==3.0.10\npsutil==5.9.0\nsix==1.16.0\n";
        let allow = vec!["psutil".to_string(), "flask".to_string()];

        let deps = filter_installed(listing, &allow);
        assert_eq!(deps.len(), 1);
        assert_eq!(deps.get("psutil"), Some(&"5.9.0".to_string()));
    }

    #[test]
    fn never_reports_packages_outside_the_allow_list() {
        let listing = "psutil==5.9.0\nrequests==2.31.0\n";
        let allow = vec!["psutil".to_string()];

        let deps = filter_installed(listing, &allow);
        assert!(!deps.contains_key("requests"));
    }

    #[test]
    fn ignores_lines_without_a_version_separator() {
        let allow = vec!["psutil".to_string()];
        let deps = filter_installed("garbage line\n-e git+https://example/repo\n", &allow);
        assert!(deps.is_empty());
    }
}
