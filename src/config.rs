use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/scanner-doctor/config.yaml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiagConfig {
    /// Location of the appliance datastore.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    /// Record groups counted by the internal-state inspection.
    #[serde(default = "default_tables")]
    pub tables: Vec<String>,
    /// Service alias -> service manager unit name.
    #[serde(default = "default_services")]
    pub services: BTreeMap<String, String>,
    /// Allow-list of runtime packages reported by the dependency probe.
    #[serde(default = "default_dependencies")]
    pub dependencies: Vec<String>,
    /// Hard deadline for every external command, in seconds.
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,
}

impl Default for DiagConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            tables: default_tables(),
            services: default_services(),
            dependencies: default_dependencies(),
            command_timeout_secs: default_command_timeout_secs(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse YAML in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("invalid configuration: {0}")]
    Validation(String),
}

impl DiagConfig {
    /// Load the explicit config path, or the system config if present, or
    /// fall back to the compiled-in defaults.
    pub fn resolve(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.is_file() {
                    Self::load_from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let path_display = path_ref.display().to_string();
        let text = fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
            path: path_display.clone(),
            source,
        })?;

        let cfg: DiagConfig = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path_display,
            source,
        })?;

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "db_path must not be empty".to_string(),
            ));
        }
        if self.command_timeout_secs < 1 {
            return Err(ConfigError::Validation(
                "command_timeout_secs must be >= 1".to_string(),
            ));
        }
        for table in &self.tables {
            // Table names end up interpolated into the count query.
            if !is_sql_identifier(table) {
                return Err(ConfigError::Validation(format!(
                    "table name '{table}' must be a plain identifier"
                )));
            }
        }
        for (alias, unit) in &self.services {
            if alias.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "service aliases must not be empty".to_string(),
                ));
            }
            if unit.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "service '{alias}' must name a unit"
                )));
            }
        }
        for dep in &self.dependencies {
            if dep.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "dependency names must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn example_yaml() -> String {
        serde_yaml::to_string(&Self::default()).unwrap_or_default()
    }
}

fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn default_db_path() -> PathBuf {
    PathBuf::from("/usr/share/scanner/scanner.sqlite3")
}

fn default_tables() -> Vec<String> {
    ["iocs", "whitelist", "misp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_services() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("frontend".to_string(), "scanner-frontend.service".to_string()),
        ("backend".to_string(), "scanner-backend.service".to_string()),
        ("kiosk".to_string(), "scanner-kiosk.service".to_string()),
        ("watchers".to_string(), "scanner-watchers.service".to_string()),
    ])
}

fn default_dependencies() -> Vec<String> {
    [
        "pymisp",
        "sqlalchemy",
        "ipwhois",
        "netaddr",
        "flask",
        "flask_httpauth",
        "pyjwt",
        "psutil",
        "pydig",
        "pyudev",
        "pyyaml",
        "wifi",
        "qrcode",
        "netifaces",
        "weasyprint",
        "python-whois",
        "six",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

const fn default_command_timeout_secs() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        DiagConfig::default().validate().expect("defaults must validate");
    }

    #[test]
    fn rejects_zero_command_timeout() {
        let mut cfg = DiagConfig::default();
        cfg.command_timeout_secs = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_table_names_that_are_not_identifiers() {
        let mut cfg = DiagConfig::default();
        cfg.tables = vec!["iocs; DROP TABLE iocs".to_string()];
        assert!(cfg.validate().is_err());

        cfg.tables = vec!["1badname".to_string()];
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_services_without_a_unit_name() {
        let mut cfg = DiagConfig::default();
        cfg.services.insert("broken".to_string(), "".to_string());
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn example_yaml_round_trips() {
        let rendered = DiagConfig::example_yaml();
        let parsed: DiagConfig = serde_yaml::from_str(&rendered).expect("example must parse");
        parsed.validate().expect("example must validate");
        assert_eq!(parsed.tables, DiagConfig::default().tables);
    }

    #[test]
    fn partial_files_fall_back_to_field_defaults() {
        let parsed: DiagConfig =
            serde_yaml::from_str("db_path: /tmp/test.sqlite3\n").expect("partial config must parse");
        assert_eq!(parsed.db_path, PathBuf::from("/tmp/test.sqlite3"));
        assert_eq!(parsed.command_timeout_secs, default_command_timeout_secs());
        assert!(!parsed.services.is_empty());
    }
}
