use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::week::geometry::DEFAULT_AUTO_SCROLL_OFFSET;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewSignal {
    /// Refresh the current time for the now-indicator.
    Tick,
    /// Smooth-scroll the grid to this offset.
    AutoScroll(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerSettings {
    pub tick_interval: Duration,
    pub auto_scroll_delay: Duration,
    pub auto_scroll_offset: f64,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(60),
            auto_scroll_delay: Duration::from_millis(300),
            auto_scroll_offset: DEFAULT_AUTO_SCROLL_OFFSET,
        }
    }
}

/// Background tasks started by a mounted week view. Every task is aborted on
/// `cancel_all` or when the owner is dropped; signals from a cancelled task
/// are never delivered afterwards.
pub struct ViewTimers {
    sender: mpsc::UnboundedSender<ViewSignal>,
    clock: Option<JoinHandle<()>>,
    auto_scroll: Option<JoinHandle<()>>,
}

impl ViewTimers {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ViewSignal>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let timers = Self {
            sender,
            clock: None,
            auto_scroll: None,
        };
        (timers, receiver)
    }

    /// Emits `Tick` every `period`, first one after a full period.
    pub fn start_clock(&mut self, period: Duration) {
        self.stop_clock();
        let period = period.max(Duration::from_millis(1));
        let sender = self.sender.clone();

        self.clock = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if sender.send(ViewSignal::Tick).is_err() {
                    break;
                }
            }
        }));
        tracing::debug!("clock tick started ({:?})", period);
    }

    pub fn stop_clock(&mut self) {
        if let Some(handle) = self.clock.take() {
            handle.abort();
        }
    }

    /// Arms a one-shot scroll. A scroll that is still pending is replaced.
    pub fn schedule_auto_scroll(&mut self, delay: Duration, target: f64) {
        self.cancel_auto_scroll();
        let sender = self.sender.clone();

        self.auto_scroll = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = sender.send(ViewSignal::AutoScroll(target));
        }));
        tracing::debug!("auto-scroll to {} armed in {:?}", target, delay);
    }

    pub fn cancel_auto_scroll(&mut self) {
        if let Some(handle) = self.auto_scroll.take() {
            handle.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        self.stop_clock();
        self.cancel_auto_scroll();
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    pub fn has_pending_scroll(&self) -> bool {
        self.auto_scroll
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for ViewTimers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
