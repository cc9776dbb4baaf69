use super::{ClockAnomaly, MetricsError, RollingHistory, Snapshot};
use crate::config;
use log::{debug, warn};
use std::time::{Duration, SystemTime};

/// Anything that can produce one [`Snapshot`] per tick.
pub trait MetricsSource {
    /// Fails only when no snapshot can be produced at all. Individual
    /// metric categories are expected to fall back to empty values.
    fn capture(&mut self) -> Result<Snapshot, MetricsError>;
}

impl<S: MetricsSource + ?Sized> MetricsSource for Box<S> {
    fn capture(&mut self) -> Result<Snapshot, MetricsError> {
        (**self).capture()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub tick_interval: Duration,
    pub history_capacity: usize,
    pub clock_jump_factor: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval: config::TICK_INTERVAL,
            history_capacity: config::HISTORY_CAPACITY,
            clock_jump_factor: config::CLOCK_JUMP_FACTOR,
        }
    }
}

impl EngineConfig {
    /// Longest gap between two ticks that still yields a rate.
    pub fn max_elapsed(&self) -> Duration {
        self.tick_interval * self.clock_jump_factor
    }
}

/// Throughput derived from two consecutive snapshots, in bytes per second.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DerivedRates {
    pub network_sent_rate_bps: f64,
    pub network_recv_rate_bps: f64,
    pub disk_read_rate_bps: f64,
    pub disk_write_rate_bps: f64,
}

impl DerivedRates {
    pub fn between(previous: &Snapshot, current: &Snapshot, elapsed: Duration) -> Self {
        Self {
            network_sent_rate_bps: counter_rate(
                previous.network.sent_bytes,
                current.network.sent_bytes,
                elapsed,
            ),
            network_recv_rate_bps: counter_rate(
                previous.network.recv_bytes,
                current.network.recv_bytes,
                elapsed,
            ),
            disk_read_rate_bps: counter_rate(
                previous.disk_io.read_bytes,
                current.disk_io.read_bytes,
                elapsed,
            ),
            disk_write_rate_bps: counter_rate(
                previous.disk_io.write_bytes,
                current.disk_io.write_bytes,
                elapsed,
            ),
        }
    }
}

/// Per-second delta of a cumulative counter. A counter that went down was
/// reset, which yields 0 rather than a negative rate.
pub fn counter_rate(previous: u64, current: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return 0.0;
    }
    current.saturating_sub(previous) as f64 / secs
}

/// Time between two captures, or the reason it cannot be used for rates.
pub fn elapsed_between(
    previous: SystemTime,
    current: SystemTime,
    limit: Duration,
) -> Result<Duration, ClockAnomaly> {
    match current.duration_since(previous) {
        Ok(elapsed) if elapsed.is_zero() => Err(ClockAnomaly::Stalled),
        Ok(elapsed) if elapsed > limit => Err(ClockAnomaly::Jump { elapsed, limit }),
        Ok(elapsed) => Ok(elapsed),
        Err(e) => Err(ClockAnomaly::Backwards(e.duration())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No snapshot taken yet.
    Cold,
    Warm,
}

/// Owned copy of the engine's current state, safe to hand to a renderer
/// on another thread.
#[derive(Debug, Clone, Default)]
pub struct Latest {
    pub snapshot: Snapshot,
    pub rates: DerivedRates,
    pub cpu_history: Vec<f32>,
    pub sent_rate_history: Vec<f64>,
    pub recv_rate_history: Vec<f64>,
    /// Successful samples so far.
    pub ticks: u64,
}

pub struct SamplingEngine<S> {
    source: S,
    config: EngineConfig,
    previous: Option<Snapshot>,
    rates: DerivedRates,
    cpu_history: RollingHistory<f32>,
    sent_history: RollingHistory<f64>,
    recv_history: RollingHistory<f64>,
    ticks: u64,
}

impl<S: MetricsSource> SamplingEngine<S> {
    pub fn new(source: S, config: EngineConfig) -> Self {
        Self {
            source,
            config,
            previous: None,
            rates: DerivedRates::default(),
            cpu_history: RollingHistory::new(config.history_capacity),
            sent_history: RollingHistory::new(config.history_capacity),
            recv_history: RollingHistory::new(config.history_capacity),
            ticks: 0,
        }
    }

    pub fn state(&self) -> EngineState {
        match self.previous {
            Some(_) => EngineState::Warm,
            None => EngineState::Cold,
        }
    }

    /// Captures one snapshot and folds it into the rates and histories.
    ///
    /// On error nothing is changed, the next call may succeed.
    pub fn sample(&mut self) -> Result<(), MetricsError> {
        let current = self.source.capture()?;

        let rates = match &self.previous {
            None => {
                debug!("first sample, starting rates from zero");
                DerivedRates::default()
            }
            Some(previous) => match elapsed_between(
                previous.captured_at,
                current.captured_at,
                self.config.max_elapsed(),
            ) {
                Ok(elapsed) => DerivedRates::between(previous, &current, elapsed),
                Err(anomaly) => {
                    warn!("{}, restarting rates from zero", MetricsError::from(anomaly));
                    DerivedRates::default()
                }
            },
        };

        self.cpu_history.push(current.cpu.total_percent);
        self.sent_history.push(rates.network_sent_rate_bps);
        self.recv_history.push(rates.network_recv_rate_bps);
        self.rates = rates;
        self.previous = Some(current);
        self.ticks += 1;

        debug!(
            "tick {}: cpu {:?}%, {:?}",
            self.ticks,
            self.cpu_history.last(),
            self.rates
        );
        Ok(())
    }

    pub fn rates(&self) -> DerivedRates {
        self.rates
    }

    pub fn cpu_history(&self) -> &RollingHistory<f32> {
        &self.cpu_history
    }

    pub fn sent_rate_history(&self) -> &RollingHistory<f64> {
        &self.sent_history
    }

    pub fn recv_rate_history(&self) -> &RollingHistory<f64> {
        &self.recv_history
    }

    pub fn latest(&self) -> Latest {
        Latest {
            snapshot: self.previous.clone().unwrap_or_default(),
            rates: self.rates,
            cpu_history: self.cpu_history.as_vec(),
            sent_rate_history: self.sent_history.as_vec(),
            recv_rate_history: self.recv_history.as_vec(),
            ticks: self.ticks,
        }
    }
}
