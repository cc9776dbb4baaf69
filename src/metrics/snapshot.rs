use std::collections::BTreeMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Everything the metrics source read during one tick.
///
/// Snapshots are never mutated after capture; the engine keeps the
/// previous one around only to diff cumulative counters against.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub captured_at: SystemTime,
    pub cpu: CpuStats,
    pub memory: MemoryStats,
    pub disk_usage: DiskUsage,
    pub disk_io: DiskIo,
    pub network: NetworkTotals,
    pub network_interfaces: BTreeMap<String, InterfaceInfo>,
    pub battery: Option<BatteryInfo>,
    /// Aggregated per name, highest CPU first.
    pub processes: Vec<ProcessCpu>,
    pub boot_time: SystemTime,
    pub uptime: Duration,
    pub internet_reachable: bool,
    pub host: HostInfo,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            captured_at: UNIX_EPOCH,
            cpu: CpuStats::default(),
            memory: MemoryStats::default(),
            disk_usage: DiskUsage::default(),
            disk_io: DiskIo::default(),
            network: NetworkTotals::default(),
            network_interfaces: BTreeMap::new(),
            battery: None,
            processes: Vec::new(),
            boot_time: UNIX_EPOCH,
            uptime: Duration::ZERO,
            internet_reachable: false,
            host: HostInfo::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuStats {
    pub total_percent: f32,
    /// Indexed by logical core.
    pub per_core: Vec<f32>,
    /// 0 when the platform does not report a frequency.
    pub frequency_mhz: f64,
}

impl CpuStats {
    pub fn core_count(&self) -> usize {
        self.per_core.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStats {
    pub used_bytes: u64,
    pub total_bytes: u64,
    pub available_bytes: u64,
    pub percent: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiskUsage {
    pub used_bytes: u64,
    pub total_bytes: u64,
    pub free_bytes: u64,
    pub percent: f32,
}

/// Cumulative since boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskIo {
    pub read_bytes: u64,
    pub write_bytes: u64,
    pub read_ops: u64,
    pub write_ops: u64,
}

/// Cumulative since boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkTotals {
    pub sent_bytes: u64,
    pub recv_bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceInfo {
    pub is_up: bool,
    pub ipv4_addresses: Vec<String>,
    /// Link speed in Mbit/s, if known.
    pub speed: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatteryInfo {
    pub percent: f32,
    pub seconds_remaining: Option<u64>,
    pub is_charging: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessCpu {
    pub name: String,
    pub cpu_percent: f32,
}

impl ProcessCpu {
    pub fn new(name: impl Into<String>, cpu_percent: f32) -> Self {
        Self {
            name: name.into(),
            cpu_percent,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostInfo {
    pub hostname: String,
    pub os_name: String,
    pub os_release: String,
    pub os_version: String,
    pub machine_arch: String,
    pub processor_name: String,
}

/// Percentage of `part` in `total`, 0 when `total` is 0.
pub fn percent_of(part: u64, total: u64) -> f32 {
    if total == 0 {
        return 0.0;
    }
    ((part as f64 / total as f64) * 100.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_of_zero_total() {
        assert_eq!(percent_of(10, 0), 0.0);
    }

    #[test]
    fn percent_of_half() {
        assert_eq!(percent_of(512, 1024), 50.0);
    }

    #[test]
    fn default_snapshot_is_empty() {
        let s = Snapshot::default();
        assert_eq!(s.cpu.core_count(), 0);
        assert!(s.battery.is_none());
        assert!(s.processes.is_empty());
        assert!(!s.internet_reachable);
    }
}
