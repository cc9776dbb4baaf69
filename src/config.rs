//! Compile-time defaults. None of these are adjustable at runtime.

use std::time::Duration;

/// One tick of the sampling driver.
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Samples kept for the CPU and network sparklines.
pub const HISTORY_CAPACITY: usize = 60;

/// Gap between the two counter reads used to derive CPU percentages.
pub const WARM_UP: Duration = Duration::from_millis(200);

/// Elapsed time above `TICK_INTERVAL * CLOCK_JUMP_FACTOR` is treated as a
/// suspend/resume and the rates restart from a fresh baseline.
pub const CLOCK_JUMP_FACTOR: u32 = 10;

pub const PROBE_ADDR: ([u8; 4], u16) = ([8, 8, 8, 8], 53);
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

#[cfg(windows)]
pub const DISK_ROOT: &str = "C:\\";
#[cfg(not(windows))]
pub const DISK_ROOT: &str = "/";
