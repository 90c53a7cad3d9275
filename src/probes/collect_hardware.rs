use crate::probes::types::{ArchInfo, DiskUsage, HardwareInfo, LoadAverages};
use std::path::Path;
use sysinfo::{Disks, System};

pub fn collect_hardware_info() -> HardwareInfo {
    let sys = System::new_all();

    HardwareInfo {
        arch: ArchInfo {
            bits: format!("{}bit", usize::BITS),
            linkage: binary_format().to_string(),
        },
        machine: std::env::consts::ARCH.to_string(),
        cpus: sys.physical_core_count().map(|n| n as u32),
        cores: sys.cpus().len() as u32,
        load: collect_load_averages(),
        disk: collect_root_disk_usage(),
    }
}

fn binary_format() -> &'static str {
    if cfg!(windows) {
        "WindowsPE"
    } else if cfg!(target_os = "macos") {
        "Mach-O"
    } else {
        "ELF"
    }
}

#[cfg(target_os = "linux")]
fn collect_load_averages() -> Option<LoadAverages> {
    use procfs::Current;
    let load = procfs::LoadAverage::current().ok()?;
    Some(LoadAverages {
        one: load.one as f64,
        five: load.five as f64,
        fifteen: load.fifteen as f64,
    })
}

#[cfg(not(target_os = "linux"))]
fn collect_load_averages() -> Option<LoadAverages> {
    None
}

/// Disk usage of the root volume only; other mounts are out of scope.
fn collect_root_disk_usage() -> DiskUsage {
    let root = Path::new(if cfg!(windows) { "C:\\" } else { "/" });
    let disks = Disks::new_with_refreshed_list();
    for disk in disks.list() {
        if disk.mount_point() == root {
            let total = disk.total_space();
            let free = disk.available_space();
            return DiskUsage {
                total,
                used: total.saturating_sub(free),
                free,
            };
        }
    }
    DiskUsage::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_pointer_width_and_at_least_one_core() {
        let hw = collect_hardware_info();
        assert_eq!(hw.arch.bits, format!("{}bit", usize::BITS));
        assert!(hw.cores >= 1);
    }

    #[test]
    fn root_disk_usage_is_internally_consistent() {
        let disk = collect_root_disk_usage();
        assert_eq!(disk.total, disk.used + disk.free);
    }
}
