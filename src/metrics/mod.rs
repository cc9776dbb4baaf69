mod circular_buffer;
mod engine;
mod error;
pub mod format;
pub mod platform;
mod process;
mod snapshot;
mod source;

pub use circular_buffer::RollingHistory;
pub use engine::*;
pub use error::{ClockAnomaly, MetricsError};
pub use process::rank_processes;
pub use snapshot::*;
pub use source::SystemSource;

use log::{debug, error, info, warn};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Background driver: one thread calling [`SamplingEngine::sample`] once
/// per tick and publishing the result for the renderer.
///
/// Ticks never overlap. A tick that runs past the interval delays the next
/// one instead of being skipped.
pub struct Sampler {
    latest: Arc<RwLock<Latest>>,
    running: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl Sampler {
    pub fn spawn<S>(source: S, config: EngineConfig) -> Self
    where
        S: MetricsSource + Send + 'static,
    {
        let latest = Arc::new(RwLock::new(Latest::default()));
        let running = Arc::new(AtomicBool::new(true));

        let latest_clone = Arc::clone(&latest);
        let running_clone = Arc::clone(&running);
        let handle = thread::spawn(move || {
            let mut engine = SamplingEngine::new(source, config);
            let tick = config.tick_interval;
            info!("sampling every {tick:?}");

            while running_clone.load(Ordering::Relaxed) {
                let started = Instant::now();
                let sampled = panic::catch_unwind(AssertUnwindSafe(|| engine.sample()));
                match sampled {
                    Ok(Ok(())) => {
                        let published = engine.latest();
                        match latest_clone.write() {
                            Ok(mut guard) => *guard = published,
                            Err(poisoned) => *poisoned.into_inner() = published,
                        }
                    }
                    Ok(Err(e)) => warn!("skipping tick: {e}"),
                    Err(_) => {
                        error!("metrics source panicked, sampling stopped");
                        running_clone.store(false, Ordering::Relaxed);
                        break;
                    }
                }

                let spent = started.elapsed();
                if spent > tick {
                    warn!("tick took {spent:?}, longer than the {tick:?} interval");
                } else {
                    thread::sleep(tick - spent);
                }
            }
            debug!("sampler stopped after {} ticks", engine.latest().ticks);
        });

        Self {
            latest,
            running,
            handle,
        }
    }

    /// Copy of the last successfully sampled state.
    pub fn latest(&self) -> Latest {
        match self.latest.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Ends the sampling thread at the next tick boundary.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    /// False once stopped or once the sampling thread has exited.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed) && !self.handle.is_finished()
    }
}

impl Drop for Sampler {
    fn drop(&mut self) {
        self.stop();
    }
}
