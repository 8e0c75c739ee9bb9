use crate::core::error::Result;
use crate::core::event::InputEvent;
use crate::ui::core::runtime::Ui;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::MissedTickBehavior;

pub const DEFAULT_FRAME_RATE: u32 = 20;

/// Why `Scheduler::run` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunExit {
    /// `Ui::stop` was called from a handler or subscriber.
    Stopped,
    /// Every input sender was dropped.
    InputClosed,
}

/// Drives one `Ui`: a fixed-interval tick that calls `update(dt)` then
/// `render()`, and dispatch of each input event as it arrives. Both branches
/// run to completion before the other is polled again, so handlers never see
/// a half-applied frame.
#[derive(Debug, Clone, Copy)]
pub struct Scheduler {
    interval: Duration,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_RATE)
    }
}

impl Scheduler {
    /// Tick every `1000 / frame_rate` ms, never faster than once per ms.
    pub fn new(frame_rate: u32) -> Self {
        let millis = 1000 / u64::from(frame_rate.max(1));
        Self {
            interval: Duration::from_millis(millis.max(1)),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run until the UI is stopped, the input channel closes, or a frame
    /// fails to present.
    pub async fn run(&self, ui: &mut Ui, mut input: UnboundedReceiver<InputEvent>) -> Result<RunExit> {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last = Instant::now();
        tracing::debug!(interval_ms = self.interval.as_millis() as u64, "scheduler started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = Instant::now();
                    ui.update(now.duration_since(last));
                    last = now;
                    ui.render()?;
                }
                event = input.recv() => match event {
                    Some(event) => ui.dispatch(event),
                    None => {
                        tracing::debug!("input closed; scheduler exiting");
                        return Ok(RunExit::InputClosed);
                    }
                },
            }

            if ui.is_stopped() {
                // Flush whatever the last handler changed.
                ui.render()?;
                tracing::debug!(frames = ui.frame_count(), "scheduler stopped");
                return Ok(RunExit::Stopped);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/scheduler.rs"]
mod tests;
