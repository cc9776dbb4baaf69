use super::LinkState;
use crate::metrics::{BatteryInfo, DiskIo, MetricsError};

pub fn disk_io() -> Result<DiskIo, MetricsError> {
    Err(MetricsError::unavailable(
        "disk io",
        "no counters on this platform",
    ))
}

pub fn battery() -> Result<Option<BatteryInfo>, MetricsError> {
    Ok(None)
}

pub fn link_state(_iface: &str) -> Option<LinkState> {
    None
}
