use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct DiagReport {
    pub collector_version: String,
    pub collected_at: String,
    pub accounts: BTreeMap<String, AccountEntry>,
    pub os: OsInfo,
    pub hardware: HardwareInfo,
    pub network: NetworkInfo,
    pub dependencies: BTreeMap<String, String>,
    pub internal_state: InternalState,
}

/// One entry per login session, plus one synthetic entry for the collector
/// process itself. Keyed `"<username>@<host-or-terminal>"`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AccountEntry {
    Session { started: i64, term: String },
    Process { pid: u32 },
}

#[derive(Debug, Serialize)]
pub struct OsInfo {
    pub system: String,
    pub release: String,
    pub version: String,
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist: Option<DistInfo>,
}

/// Distribution descriptor, shaped per platform family.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DistInfo {
    Linux {
        lib: String,
        version: String,
    },
    #[cfg(windows)]
    Windows {
        release: String,
        version: String,
        build: String,
    },
}

#[derive(Debug, Serialize)]
pub struct HardwareInfo {
    pub arch: ArchInfo,
    pub machine: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpus: Option<u32>,
    pub cores: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load: Option<LoadAverages>,
    pub disk: DiskUsage,
}

#[derive(Debug, Serialize)]
pub struct ArchInfo {
    pub bits: String,
    pub linkage: String,
}

#[derive(Debug, Serialize)]
pub struct LoadAverages {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

#[derive(Debug, Default, Serialize)]
pub struct DiskUsage {
    pub total: u64,
    pub used: u64,
    pub free: u64,
}

#[derive(Debug, Default, Serialize)]
pub struct NetworkInfo {
    pub namei: BTreeMap<String, u32>,
    pub interfaces: BTreeMap<String, BTreeMap<String, u64>>,
}

#[derive(Debug, Serialize)]
pub struct InternalState {
    pub db: DbState,
    pub services: BTreeMap<String, ServiceStatus>,
}

#[derive(Debug, Serialize)]
pub struct DbState {
    pub available: bool,
    pub size: u64,
    pub records: BTreeMap<String, u64>,
}

#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub running: bool,
    pub exit_status: i32,
    pub detail: String,
}
