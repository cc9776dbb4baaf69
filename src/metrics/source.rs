use super::{
    percent_of, platform, rank_processes, BatteryInfo, CpuStats, DiskIo, DiskUsage, HostInfo,
    InterfaceInfo, MemoryStats, MetricsError, MetricsSource, NetworkTotals, ProcessCpu, Snapshot,
};
use crate::config;
use log::{debug, trace};
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::net::{IpAddr, SocketAddr, TcpStream};
use std::path::Path;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use sysinfo::{Disks, Networks, ProcessesToUpdate, System};

/// Reads the live machine through `sysinfo`, topped up with the
/// platform readers for disk IO, battery and link state.
pub struct SystemSource {
    system: System,
    networks: Networks,
    warm_up: Duration,
    disk_root: &'static Path,
    probe: SocketAddr,
    probe_timeout: Duration,
}

impl Default for SystemSource {
    fn default() -> Self {
        Self::new(config::WARM_UP)
    }
}

impl SystemSource {
    pub fn new(warm_up: Duration) -> Self {
        let (ip, port) = config::PROBE_ADDR;
        Self {
            system: System::new(),
            networks: Networks::new_with_refreshed_list(),
            // sysinfo needs at least this long between two CPU reads
            warm_up: warm_up.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL),
            disk_root: Path::new(config::DISK_ROOT),
            probe: SocketAddr::from((ip, port)),
            probe_timeout: config::PROBE_TIMEOUT,
        }
    }

    /// Takes the baseline for CPU and per-process usage, waits the
    /// warm-up window and reads again.
    fn measure_cpu(&mut self) {
        self.system.refresh_cpu_usage();
        self.system.refresh_processes(ProcessesToUpdate::All, true);
        thread::sleep(self.warm_up);
        self.system.refresh_cpu_usage();
        self.system.refresh_cpu_frequency();
        self.system.refresh_processes(ProcessesToUpdate::All, true);
    }

    fn cpu(&self) -> Result<CpuStats, MetricsError> {
        let cpus = self.system.cpus();
        if cpus.is_empty() {
            return Err(MetricsError::unavailable("cpu", "no processors reported"));
        }
        Ok(CpuStats {
            total_percent: self.system.global_cpu_usage().clamp(0.0, 100.0),
            per_core: cpus.iter().map(|c| c.cpu_usage().clamp(0.0, 100.0)).collect(),
            frequency_mhz: mean_frequency(cpus.iter().map(|c| c.frequency())),
        })
    }

    fn memory(&mut self) -> MemoryStats {
        self.system.refresh_memory();
        let total = self.system.total_memory();
        let available = self.system.available_memory();
        let used = total.saturating_sub(available);
        MemoryStats {
            used_bytes: used,
            total_bytes: total,
            available_bytes: available,
            percent: percent_of(used, total),
        }
    }

    fn disk_usage(&self) -> Result<DiskUsage, MetricsError> {
        let disks = Disks::new_with_refreshed_list();
        let disk = disks
            .list()
            .iter()
            .find(|d| d.mount_point() == self.disk_root)
            .ok_or_else(|| {
                MetricsError::unavailable("disk usage", format!("{:?} not mounted", self.disk_root))
            })?;
        let total = disk.total_space();
        let free = disk.available_space();
        let used = total.saturating_sub(free);
        Ok(DiskUsage {
            used_bytes: used,
            total_bytes: total,
            free_bytes: free,
            percent: percent_of(used, total),
        })
    }

    fn network(&mut self) -> (NetworkTotals, BTreeMap<String, InterfaceInfo>) {
        self.networks.refresh(true);
        let mut totals = NetworkTotals::default();
        let mut interfaces = BTreeMap::new();

        for (name, data) in self.networks.iter() {
            totals.sent_bytes = totals.sent_bytes.saturating_add(data.total_transmitted());
            totals.recv_bytes = totals.recv_bytes.saturating_add(data.total_received());

            let ipv4_addresses: Vec<String> = data
                .ip_networks()
                .iter()
                .filter_map(|net| match net.addr {
                    IpAddr::V4(v4) => Some(v4.to_string()),
                    IpAddr::V6(_) => None,
                })
                .collect();
            let link = platform::link_state(name).unwrap_or_else(|| platform::LinkState {
                is_up: !ipv4_addresses.is_empty(),
                speed: None,
            });
            interfaces.insert(
                name.clone(),
                InterfaceInfo {
                    is_up: link.is_up,
                    ipv4_addresses,
                    speed: link.speed,
                },
            );
        }
        (totals, interfaces)
    }

    fn processes(&self) -> Vec<ProcessCpu> {
        let readings = self
            .system
            .processes()
            .values()
            .filter_map(|p| match process_reading(p.pid().as_u32(), p.name(), p.cpu_usage()) {
                Ok(reading) => Some(reading),
                Err(e) => {
                    trace!("{e}");
                    None
                }
            });
        rank_processes(readings)
    }

    fn host(&self) -> HostInfo {
        let unknown = || "unknown".to_string();
        HostInfo {
            hostname: System::host_name().unwrap_or_else(unknown),
            os_name: System::name().unwrap_or_else(unknown),
            os_release: System::kernel_version().unwrap_or_else(unknown),
            os_version: System::long_os_version().unwrap_or_else(unknown),
            machine_arch: std::env::consts::ARCH.to_string(),
            processor_name: self
                .system
                .cpus()
                .first()
                .map(|c| c.brand().trim().to_string())
                .unwrap_or_default(),
        }
    }

    fn internet_reachable(&self) -> bool {
        match TcpStream::connect_timeout(&self.probe, self.probe_timeout) {
            Ok(_) => true,
            Err(e) => {
                debug!("connectivity probe to {} failed: {e}", self.probe);
                false
            }
        }
    }
}

fn process_reading(pid: u32, name: &OsStr, cpu: f32) -> Result<(String, f32), MetricsError> {
    if !cpu.is_finite() {
        return Err(MetricsError::TransientProcess {
            pid,
            reason: format!("cpu reading {cpu}"),
        });
    }
    let name = name.to_string_lossy();
    let name = if name.is_empty() {
        "unknown".to_string()
    } else {
        name.into_owned()
    };
    Ok((name, cpu))
}

/// Average over all cores, 0 when no core reports a frequency.
fn mean_frequency(frequencies: impl Iterator<Item = u64>) -> f64 {
    let (sum, count) = frequencies
        .filter(|&f| f > 0)
        .fold((0u64, 0u64), |(sum, count), f| (sum.saturating_add(f), count + 1));
    if count == 0 {
        return 0.0;
    }
    sum as f64 / count as f64
}

/// Logs a failed category and substitutes `fallback`.
fn or_default<T>(result: Result<T, MetricsError>, fallback: T) -> T {
    result.unwrap_or_else(|e| {
        debug!("{e}");
        fallback
    })
}

impl MetricsSource for SystemSource {
    fn capture(&mut self) -> Result<Snapshot, MetricsError> {
        self.measure_cpu();
        let cpu = self.cpu()?;
        let memory = self.memory();
        let disk_usage = or_default(self.disk_usage(), DiskUsage::default());
        let disk_io = or_default(platform::disk_io(), DiskIo::default());
        let (network, network_interfaces) = self.network();
        // stamped next to the cumulative counters the engine diffs
        let captured_at = SystemTime::now();
        let battery: Option<BatteryInfo> = or_default(platform::battery(), None);
        let processes = self.processes();
        let internet_reachable = self.internet_reachable();
        let host = self.host();
        Ok(Snapshot {
            captured_at,
            cpu,
            memory,
            disk_usage,
            disk_io,
            network,
            network_interfaces,
            battery,
            processes,
            boot_time: UNIX_EPOCH + Duration::from_secs(System::boot_time()),
            uptime: Duration::from_secs(System::uptime()),
            internet_reachable,
            host,
        })
    }
}
