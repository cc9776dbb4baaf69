use super::LinkState;
use crate::metrics::{BatteryInfo, DiskIo, MetricsError};
use std::fs;
use std::path::Path;

const SECTOR_SIZE: u64 = 512;
const IFF_UP: u32 = 0x1;

pub fn disk_io() -> Result<DiskIo, MetricsError> {
    let s = fs::read_to_string("/proc/diskstats")
        .map_err(|e| MetricsError::unavailable("disk io", e))?;
    // partitions have no /sys/block entry, so they are not counted twice
    Ok(parse_diskstats(&s, |name| {
        Path::new("/sys/block").join(name.replace('/', "!")).exists()
    }))
}

/// Sums the counters of every device accepted by `is_disk`.
///
/// Lines look like `major minor name reads merged sectors ms writes merged sectors ...`.
/// Malformed lines are skipped.
pub fn parse_diskstats(s: &str, is_disk: impl Fn(&str) -> bool) -> DiskIo {
    let mut io = DiskIo::default();
    for line in s.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 10 || !is_disk(fields[2]) {
            continue;
        }
        let num = |i: usize| fields[i].parse::<u64>().ok();
        let (Some(reads), Some(read_sectors), Some(writes), Some(write_sectors)) =
            (num(3), num(5), num(7), num(9))
        else {
            continue;
        };
        io.read_ops = io.read_ops.saturating_add(reads);
        io.write_ops = io.write_ops.saturating_add(writes);
        io.read_bytes = io
            .read_bytes
            .saturating_add(read_sectors.saturating_mul(SECTOR_SIZE));
        io.write_bytes = io
            .write_bytes
            .saturating_add(write_sectors.saturating_mul(SECTOR_SIZE));
    }
    io
}

/// First battery under `/sys/class/power_supply`, `None` on machines without one.
pub fn battery() -> Result<Option<BatteryInfo>, MetricsError> {
    let entries = match fs::read_dir("/sys/class/power_supply") {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(MetricsError::unavailable("battery", e)),
    };

    for entry in entries.flatten() {
        let dir = entry.path();
        let attr = |name: &str| {
            fs::read_to_string(dir.join(name))
                .ok()
                .map(|v| v.trim().to_string())
        };
        if attr("type").as_deref() != Some("Battery") {
            continue;
        }
        if let Some(info) = battery_from_attrs(attr) {
            return Ok(Some(info));
        }
    }
    Ok(None)
}

/// Builds battery info from sysfs attributes looked up by `attr`.
pub fn battery_from_attrs(attr: impl Fn(&str) -> Option<String>) -> Option<BatteryInfo> {
    let num = |name: &str| attr(name).and_then(|v| v.parse::<u64>().ok());

    let percent = match num("capacity") {
        Some(capacity) => capacity.min(100) as f32,
        None => {
            let (now, full) = num("energy_now")
                .zip(num("energy_full"))
                .or_else(|| num("charge_now").zip(num("charge_full")))?;
            if full == 0 {
                return None;
            }
            ((now as f64 / full as f64) * 100.0).min(100.0) as f32
        }
    };

    let status = attr("status").unwrap_or_default().to_ascii_lowercase();
    let is_charging = matches!(status.as_str(), "charging" | "full" | "not charging");

    // µWh / µW and µAh / µA both give hours
    let seconds_remaining = if is_charging {
        None
    } else {
        num("energy_now")
            .zip(num("power_now"))
            .or_else(|| num("charge_now").zip(num("current_now")))
            .filter(|&(_, draw)| draw > 0)
            .map(|(left, draw)| left * 3600 / draw)
    };

    Some(BatteryInfo {
        percent,
        seconds_remaining,
        is_charging,
    })
}

pub fn link_state(iface: &str) -> Option<LinkState> {
    let dir = Path::new("/sys/class/net").join(iface);
    let flags = fs::read_to_string(dir.join("flags")).ok()?;
    let speed = fs::read_to_string(dir.join("speed")).ok();
    Some(parse_link_state(&flags, speed.as_deref()))
}

/// `flags` is hex like `0x1003`; `speed` is Mbit/s and `-1` when unknown.
pub fn parse_link_state(flags: &str, speed: Option<&str>) -> LinkState {
    let flags = flags.trim();
    let flags = u32::from_str_radix(flags.trim_start_matches("0x"), 16).unwrap_or(0);
    let speed = speed
        .and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|&s| s > 0)
        .and_then(|s| u32::try_from(s).ok());
    LinkState {
        is_up: flags & IFF_UP != 0,
        speed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const DISKSTATS: &str = "\
   8       0 sda 1000 10 2048 500 400 20 4096 300 0 800 800 0 0 0 0
   8       1 sda1 900 10 2000 450 390 20 4000 290 0 700 700 0 0 0 0
 259       0 nvme0n1 10 0 8 1 2 0 16 1 0 2 2
   7       0 loop0 garbage";

    #[test]
    fn diskstats_counts_whole_disks_only() {
        let io = parse_diskstats(DISKSTATS, |name| !name.ends_with('1') || name == "nvme0n1");
        assert_eq!(io.read_ops, 1010);
        assert_eq!(io.write_ops, 402);
        assert_eq!(io.read_bytes, (2048 + 8) * 512);
        assert_eq!(io.write_bytes, (4096 + 16) * 512);
    }

    #[test]
    fn diskstats_empty() {
        assert_eq!(parse_diskstats("", |_| true), DiskIo::default());
    }

    fn attrs(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn discharging_battery() {
        let info = battery_from_attrs(attrs(&[
            ("capacity", "57"),
            ("status", "Discharging"),
            ("energy_now", "20000000"),
            ("power_now", "10000000"),
        ]))
        .unwrap();
        assert_eq!(info.percent, 57.0);
        assert!(!info.is_charging);
        assert_eq!(info.seconds_remaining, Some(7200));
    }

    #[test]
    fn charging_battery_has_no_estimate() {
        let info = battery_from_attrs(attrs(&[
            ("capacity", "80"),
            ("status", "Charging"),
            ("energy_now", "20000000"),
            ("power_now", "10000000"),
        ]))
        .unwrap();
        assert!(info.is_charging);
        assert_eq!(info.seconds_remaining, None);
    }

    #[test]
    fn battery_percent_from_charge() {
        let info = battery_from_attrs(attrs(&[
            ("status", "Discharging"),
            ("charge_now", "1500"),
            ("charge_full", "3000"),
            ("current_now", "0"),
        ]))
        .unwrap();
        assert_eq!(info.percent, 50.0);
        assert_eq!(info.seconds_remaining, None);
    }

    #[test]
    fn battery_without_readings() {
        assert!(battery_from_attrs(attrs(&[("status", "Unknown")])).is_none());
    }

    #[test]
    fn link_up_with_speed() {
        let state = parse_link_state("0x1003\n", Some("1000\n"));
        assert_eq!(
            state,
            LinkState {
                is_up: true,
                speed: Some(1000)
            }
        );
    }

    #[test]
    fn link_down_unknown_speed() {
        let state = parse_link_state("0x1002", Some("-1"));
        assert!(!state.is_up);
        assert_eq!(state.speed, None);
    }
}
