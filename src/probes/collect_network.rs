use crate::probes::types::NetworkInfo;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Bookkeeping entries that are not I/O counters.
const EXCLUDED_COUNTER_KEYS: [&str; 2] = ["index", "count"];

/// Entry point: collect the interface name/index map and per-interface I/O
/// counters. Platforms without a sysfs network class degrade to empty maps.
pub fn collect_network_info() -> NetworkInfo {
    let mut info = NetworkInfo::default();
    let sys_class_net = Path::new("/sys/class/net");

    let entries = match fs::read_dir(sys_class_net) {
        Ok(e) => e,
        Err(_) => return info,
    };

    for entry in entries.flatten() {
        let name = match entry.file_name().into_string() {
            Ok(n) => n,
            Err(_) => continue,
        };
        let iface_path = entry.path();

        if let Some(index) = read_to_u32(iface_path.join("ifindex")) {
            info.namei.insert(name.clone(), index);
        }

        info.interfaces
            .insert(name, read_io_counters(&iface_path.join("statistics")));
    }

    info
}

fn read_io_counters(stats_path: &Path) -> BTreeMap<String, u64> {
    let mut counters = BTreeMap::new();

    let entries = match fs::read_dir(stats_path) {
        Ok(e) => e,
        Err(_) => return counters,
    };

    for entry in entries.flatten() {
        let key = match entry.file_name().into_string() {
            Ok(k) => k,
            Err(_) => continue,
        };
        if EXCLUDED_COUNTER_KEYS.contains(&key.as_str()) {
            continue;
        }
        if let Some(value) = read_to_u64(entry.path()) {
            counters.insert(key, value);
        }
    }

    counters
}

fn read_to_string_trim<P: AsRef<Path>>(path: P) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn read_to_u32<P: AsRef<Path>>(path: P) -> Option<u32> {
    read_to_string_trim(path)?.parse::<u32>().ok()
}

fn read_to_u64<P: AsRef<Path>>(path: P) -> Option<u64> {
    read_to_string_trim(path)?.parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("scanner-doctor-{tag}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn counter_maps_never_carry_bookkeeping_keys() {
        let dir = scratch_dir("netstats");
        fs::write(dir.join("rx_bytes"), "1024\n").unwrap();
        fs::write(dir.join("tx_errors"), "0\n").unwrap();
        fs::write(dir.join("index"), "3\n").unwrap();
        fs::write(dir.join("count"), "2\n").unwrap();

        let counters = read_io_counters(&dir);
        assert_eq!(counters.get("rx_bytes"), Some(&1024));
        assert_eq!(counters.get("tx_errors"), Some(&0));
        assert!(!counters.contains_key("index"));
        assert!(!counters.contains_key("count"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn non_numeric_counter_files_are_skipped() {
        let dir = scratch_dir("netstats-bad");
        fs::write(dir.join("rx_bytes"), "not-a-number\n").unwrap();
        fs::write(dir.join("tx_bytes"), "512\n").unwrap();

        let counters = read_io_counters(&dir);
        assert!(!counters.contains_key("rx_bytes"));
        assert_eq!(counters.get("tx_bytes"), Some(&512));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_statistics_dir_yields_an_empty_map() {
        let counters = read_io_counters(Path::new("/definitely/not/here"));
        assert!(counters.is_empty());
    }
}
