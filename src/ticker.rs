//! Periodic move ticks while a game is running.
//!
//! DESIGN
//! ======
//! The session controller never owns a timer directly. It asks a
//! [`Scheduler`] to start a ticker under a fresh [`TickerHandle`] and cancels
//! that handle on stop. Ticks come back to the controller as plain events
//! carrying their handle, so a tick that was already queued when the ticker
//! was cancelled is recognised as stale and dropped.

#[cfg(test)]
#[path = "ticker_test.rs"]
mod ticker_test;

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

/// Interval between `play_move` requests while playing.
pub const MOVE_INTERVAL: Duration = Duration::from_millis(500);

/// Identity of one started ticker. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickerHandle(u64);

impl TickerHandle {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Starts and cancels recurring tickers.
pub trait Scheduler {
    /// Deliver `handle` every `period`, first delivery one period from now.
    fn start(&mut self, handle: TickerHandle, period: Duration);

    /// Stop delivering `handle`. Must take effect before returning.
    fn cancel(&mut self, handle: TickerHandle);
}

// =============================================================================
// TOKIO
// =============================================================================

/// One `tokio::time::interval` task per ticker, each posting its handle into
/// a shared channel drained by the runtime loop.
pub struct TokioScheduler {
    ticks: mpsc::UnboundedSender<TickerHandle>,
    tasks: HashMap<TickerHandle, JoinHandle<()>>,
}

impl TokioScheduler {
    /// Must be used from within a Tokio runtime.
    #[must_use]
    pub fn new(ticks: mpsc::UnboundedSender<TickerHandle>) -> Self {
        Self { ticks, tasks: HashMap::new() }
    }

    /// Number of tickers currently running.
    #[must_use]
    pub fn active(&self) -> usize {
        self.tasks.len()
    }
}

impl Scheduler for TokioScheduler {
    fn start(&mut self, handle: TickerHandle, period: Duration) {
        let ticks = self.ticks.clone();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if ticks.send(handle).is_err() {
                    debug!(ticker = handle.id(), "tick receiver gone; ticker exiting");
                    break;
                }
            }
        });
        if let Some(previous) = self.tasks.insert(handle, task) {
            previous.abort();
        }
    }

    fn cancel(&mut self, handle: TickerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for task in self.tasks.values() {
            task.abort();
        }
    }
}

// =============================================================================
// MANUAL
// =============================================================================

/// Records start/cancel calls without any timer. Hosts drive ticks by hand,
/// which makes the controller testable without a runtime.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    started: Vec<(TickerHandle, Duration)>,
    cancelled: Vec<TickerHandle>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `start` call, in order.
    #[must_use]
    pub fn started(&self) -> &[(TickerHandle, Duration)] {
        &self.started
    }

    /// Every `cancel` call, in order.
    #[must_use]
    pub fn cancelled(&self) -> &[TickerHandle] {
        &self.cancelled
    }

    /// The most recently started ticker, unless it has been cancelled.
    #[must_use]
    pub fn running(&self) -> Option<TickerHandle> {
        let (handle, _) = self.started.last()?;
        (!self.cancelled.contains(handle)).then_some(*handle)
    }
}

impl Scheduler for ManualScheduler {
    fn start(&mut self, handle: TickerHandle, period: Duration) {
        self.started.push((handle, period));
    }

    fn cancel(&mut self, handle: TickerHandle) {
        self.cancelled.push(handle);
    }
}
