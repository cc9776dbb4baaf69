use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use sysdash::metrics::{
    format::format_bytes, rank_processes, EngineConfig, EngineState, MetricsError, MetricsSource,
    NetworkTotals, ProcessCpu, Sampler, SamplingEngine, Snapshot,
};

/// Emits snapshots whose network counters follow `sent`, one second apart
/// unless a custom clock is given.
struct Scripted {
    frames: Vec<(SystemTime, u64)>,
    next: usize,
}

impl Scripted {
    fn one_second_apart(sent: &[u64]) -> Self {
        let frames = sent
            .iter()
            .enumerate()
            .map(|(i, &s)| (UNIX_EPOCH + Duration::from_secs(1_000 + i as u64), s))
            .collect();
        Self { frames, next: 0 }
    }
}

impl MetricsSource for Scripted {
    fn capture(&mut self) -> Result<Snapshot, MetricsError> {
        let (captured_at, sent) = *self
            .frames
            .get(self.next)
            .ok_or_else(|| MetricsError::unavailable("script", "no more frames"))?;
        self.next += 1;
        Ok(Snapshot {
            captured_at,
            network: NetworkTotals {
                sent_bytes: sent,
                recv_bytes: sent / 2,
            },
            processes: rank_processes([("a", 5.0), ("b", 3.0), ("a", 2.0)]),
            ..Snapshot::default()
        })
    }
}

#[test]
fn sent_rate_from_two_polls() {
    let mut engine = SamplingEngine::new(
        Scripted::one_second_apart(&[1000, 2500]),
        EngineConfig::default(),
    );
    engine.sample().unwrap();
    assert_eq!(engine.rates().network_sent_rate_bps, 0.0);

    engine.sample().unwrap();
    assert_eq!(engine.rates().network_sent_rate_bps, 1500.0);
    assert_eq!(engine.rates().network_recv_rate_bps, 750.0);
}

#[test]
fn first_sample_is_always_zero() {
    let mut engine = SamplingEngine::new(
        Scripted::one_second_apart(&[u64::MAX / 2]),
        EngineConfig::default(),
    );
    assert_eq!(engine.state(), EngineState::Cold);
    engine.sample().unwrap();
    assert_eq!(engine.state(), EngineState::Warm);
    assert_eq!(engine.latest().rates.network_sent_rate_bps, 0.0);
}

#[test]
fn backwards_clock_never_goes_negative() {
    let source = Scripted {
        frames: vec![
            (UNIX_EPOCH + Duration::from_secs(100), 10),
            (UNIX_EPOCH + Duration::from_secs(50), 5_000),
            (UNIX_EPOCH + Duration::from_secs(40), 1),
        ],
        next: 0,
    };
    let mut engine = SamplingEngine::new(source, EngineConfig::default());
    for _ in 0..3 {
        engine.sample().unwrap();
        let latest = engine.latest();
        assert!(latest.rates.network_sent_rate_bps >= 0.0);
        assert!(latest.sent_rate_history.iter().all(|&r| r == 0.0));
    }
    assert_eq!(engine.latest().cpu_history.len(), 3);
}

#[test]
fn snapshot_carries_ranked_processes() {
    let mut engine =
        SamplingEngine::new(Scripted::one_second_apart(&[0]), EngineConfig::default());
    engine.sample().unwrap();
    assert_eq!(
        engine.latest().snapshot.processes,
        vec![ProcessCpu::new("a", 7.0), ProcessCpu::new("b", 3.0)]
    );
}

#[test]
fn formatting_examples() {
    assert_eq!(format_bytes(0), "0 B");
    assert_eq!(format_bytes(1536), "1.50 KB");
    assert_eq!(format_bytes(1024 * 1024 * 1024), "1.00 GB");
}

/// Counts captures so the test can see the driver ticking.
struct Counting {
    calls: Arc<AtomicUsize>,
    fail_every_other: bool,
}

impl MetricsSource for Counting {
    fn capture(&mut self) -> Result<Snapshot, MetricsError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_every_other && n % 2 == 1 {
            return Err(MetricsError::unavailable("test", "flaky"));
        }
        Ok(Snapshot {
            captured_at: SystemTime::now(),
            ..Snapshot::default()
        })
    }
}

fn wait_for(deadline: Duration, mut done: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < deadline {
        if done() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    false
}

#[test]
fn sampler_publishes_and_stops() {
    let calls = Arc::new(AtomicUsize::new(0));
    let config = EngineConfig {
        tick_interval: Duration::from_millis(10),
        ..EngineConfig::default()
    };
    let sampler = Sampler::spawn(
        Counting {
            calls: Arc::clone(&calls),
            fail_every_other: false,
        },
        config,
    );

    assert!(wait_for(Duration::from_secs(5), || sampler.latest().ticks >= 3));
    assert!(sampler.is_running());

    sampler.stop();
    assert!(!sampler.is_running());
    std::thread::sleep(Duration::from_millis(50));
    let settled = calls.load(Ordering::SeqCst);
    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(calls.load(Ordering::SeqCst), settled);
}

#[test]
fn sampler_skips_failed_ticks() {
    let calls = Arc::new(AtomicUsize::new(0));
    let config = EngineConfig {
        tick_interval: Duration::from_millis(5),
        ..EngineConfig::default()
    };
    let sampler = Sampler::spawn(
        Counting {
            calls: Arc::clone(&calls),
            fail_every_other: true,
        },
        config,
    );

    assert!(wait_for(Duration::from_secs(5), || {
        calls.load(Ordering::SeqCst) >= 8
    }));
    let latest = sampler.latest();
    // only the successful half of the captures counts as ticks
    assert!(latest.ticks as usize <= calls.load(Ordering::SeqCst) / 2 + 1);
    assert!(latest.cpu_history.len() as u64 == latest.ticks.min(60));
}

struct Panicking;

impl MetricsSource for Panicking {
    fn capture(&mut self) -> Result<Snapshot, MetricsError> {
        panic!("sensor read blew up");
    }
}

#[test]
fn sampler_reports_dead_thread() {
    let config = EngineConfig {
        tick_interval: Duration::from_millis(5),
        ..EngineConfig::default()
    };
    let sampler = Sampler::spawn(Panicking, config);

    assert!(wait_for(Duration::from_secs(5), || !sampler.is_running()));
    assert_eq!(sampler.latest().ticks, 0);
}
