//! Tracker runner - the refresh loop.
//!
//! Spawns one background thread that runs a tick (both sides, in order)
//! immediately and then once per refresh interval until stopped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::tracker::config::TrackerConfig;
use crate::tracker::pipeline::{Pipeline, SideSink, TextSource};

/// Granularity of stop-flag checks while waiting for the next tick.
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Handle to a running tracker thread.
pub struct TrackerHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl TrackerHandle {
    /// Asks the loop to exit before its next tick.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Stops the loop and waits for the thread to exit.
    ///
    /// A tick already in progress (capture, OCR) runs to completion first.
    pub fn join(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        self.stop();
        if let Some(thread) = self.thread.take() {
            if let Err(e) = thread.join() {
                crate::log(&format!("Tracker thread panicked: {:?}", e));
            }
        }
    }
}

impl Drop for TrackerHandle {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

/// Starts the refresh loop in a background thread.
///
/// Returns immediately after spawning the thread.
pub fn start_tracker<T, K>(
    pipeline: Pipeline,
    source: T,
    sink: K,
    config: TrackerConfig,
) -> TrackerHandle
where
    T: TextSource + Send + 'static,
    K: SideSink + Send + 'static,
{
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = stop.clone();

    crate::log(&format!(
        "Starting tracker: refresh every {} ms",
        config.refresh_interval_ms
    ));

    let thread = thread::spawn(move || {
        run_tracker_loop(pipeline, source, sink, config, &stop_flag);
        crate::log("Tracker thread finished");
    });

    TrackerHandle {
        stop,
        thread: Some(thread),
    }
}

/// Runs the refresh loop (called from the tracker thread).
fn run_tracker_loop<T, K>(
    pipeline: Pipeline,
    mut source: T,
    mut sink: K,
    config: TrackerConfig,
    stop: &AtomicBool,
) where
    T: TextSource,
    K: SideSink,
{
    let interval = Duration::from_millis(config.refresh_interval_ms);
    let mut error = None;

    while !stop.load(Ordering::SeqCst) {
        let tick_start = Instant::now();

        if let Err(e) = pipeline.run_tick(&mut source, &mut sink, &config) {
            crate::log(&format!("Tracker stopped: {:#}", e));
            error = Some(format!("{:#}", e));
            break;
        }

        wait_until(tick_start + interval, stop);
    }

    sink.on_stopped(error);
}

/// Sleeps until `deadline`, returning early once `stop` is set.
fn wait_until(deadline: Instant, stop: &AtomicBool) {
    loop {
        if stop.load(Ordering::SeqCst) {
            return;
        }
        let now = Instant::now();
        if now >= deadline {
            return;
        }
        thread::sleep((deadline - now).min(STOP_POLL_INTERVAL));
    }
}
