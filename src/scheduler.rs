//! Periodic refresh of the sample registry.
//!
//! A cycle fetches the monitor list, maps it to samples and publishes the
//! result. Failed cycles publish nothing, so scrapes keep seeing the last good
//! snapshot until a later tick succeeds.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::time::{interval_at, timeout, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::metrics::{map_monitors, MetricsRecorder, SampleRegistry};
use crate::models::Snapshot;
use crate::upstream::{MonitorSource, UpstreamError};
use crate::utils::log_throttle::{reset, should_emit};

const FAILURE_LOG_WINDOW: Duration = Duration::from_secs(300);
const FAILURE_LOG_KEY: &str = "scheduler.refresh.failure";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Fetching,
}

/// Result of a single refresh cycle.
#[derive(Debug)]
pub enum CycleOutcome {
    Success { monitors: usize, samples: usize },
    Failure(UpstreamError),
}

impl CycleOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CycleOutcome::Success { .. })
    }
}

pub struct RefreshScheduler<M: MetricsRecorder> {
    source: Arc<dyn MonitorSource>,
    registry: Arc<SampleRegistry>,
    recorder: M,
    job: String,
    interval: Duration,
    fetch_timeout: Duration,
    state: Mutex<SchedulerState>,
    last_success: Mutex<Option<DateTime<Utc>>>,
}

impl<M: MetricsRecorder> RefreshScheduler<M> {
    pub fn new(
        source: Arc<dyn MonitorSource>,
        registry: Arc<SampleRegistry>,
        recorder: M,
        job: impl Into<String>,
        interval: Duration,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            source,
            registry,
            recorder,
            job: job.into(),
            interval,
            fetch_timeout,
            state: Mutex::new(SchedulerState::Idle),
            last_success: Mutex::new(None),
        }
    }

    pub fn state(&self) -> SchedulerState {
        *self.state.lock()
    }

    /// Completion time of the last successful cycle.
    pub fn last_success(&self) -> Option<DateTime<Utc>> {
        *self.last_success.lock()
    }

    /// Run one fetch → map → publish cycle.
    ///
    /// The fetch is bounded by the fetch timeout; a source that does not answer
    /// in time counts as [`UpstreamError::Timeout`].
    pub async fn run_cycle(&self) -> CycleOutcome {
        let started = Instant::now();
        *self.state.lock() = SchedulerState::Fetching;
        debug!(
            event_name = "scheduler.refresh.start",
            event_domain = "scheduler",
            source = self.source.get_name(),
            "refresh cycle started"
        );

        let fetched = match timeout(self.fetch_timeout, self.source.fetch_monitors()).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout),
        };
        *self.state.lock() = SchedulerState::Idle;
        let duration = started.elapsed().as_secs_f64();

        match fetched {
            Ok(monitors) => {
                let samples = map_monitors(&monitors, &self.job);
                let sample_count = samples.len();
                let down = monitors.iter().filter(|m| m.status.is_down()).count();
                let snapshot = Snapshot::new(samples, monitors.len());
                let produced_at = snapshot.produced_at;
                self.registry.publish(snapshot);

                *self.last_success.lock() = Some(produced_at);
                self.recorder
                    .record_refresh_success(monitors.len(), duration, produced_at.timestamp());
                reset(FAILURE_LOG_KEY);
                info!(
                    event_name = "scheduler.refresh.success",
                    event_domain = "scheduler",
                    monitors = monitors.len(),
                    monitors_down = down,
                    samples = sample_count,
                    duration_seconds = duration,
                    "refresh cycle succeeded"
                );
                CycleOutcome::Success {
                    monitors: monitors.len(),
                    samples: sample_count,
                }
            }
            Err(e) => {
                self.recorder.record_refresh_failure(e.reason(), duration);
                if let Some(suppressed_count) = should_emit(FAILURE_LOG_KEY, FAILURE_LOG_WINDOW) {
                    error!(
                        event_name = "scheduler.refresh.failure",
                        event_domain = "scheduler",
                        reason = e.reason(),
                        suppressed_count,
                        duration_seconds = duration,
                        "refresh cycle failed, keeping previous snapshot: {}",
                        e
                    );
                } else {
                    debug!(
                        event_name = "scheduler.refresh.failure",
                        event_domain = "scheduler",
                        reason = e.reason(),
                        "refresh cycle failed again: {}",
                        e
                    );
                }
                CycleOutcome::Failure(e)
            }
        }
    }

    /// Run a cycle every `interval` until `shutdown` is cancelled.
    ///
    /// The first tick fires one interval from now; call [`Self::run_cycle`]
    /// beforehand for an immediate refresh.
    pub async fn run(self: Arc<Self>, shutdown: CancellationToken) {
        let mut ticker = interval_at(tokio::time::Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(
            interval_seconds = self.interval.as_secs(),
            "Refresh scheduler started"
        );

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Refresh scheduler stopped");
                    break;
                }
                _ = ticker.tick() => {
                    self.run_cycle().await;
                }
            }
        }
    }
}
