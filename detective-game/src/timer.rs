//! Round countdown timer.
//!
//! The core owns only the counter; the host drives it by calling
//! [`TimerState::tick_second`] once per wall-clock second. Expiry fires
//! exactly once per countdown.

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerState {
    pub seconds: u32,
    pub max: u32,
    pub running: bool,
}

/// Result of advancing the timer by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// Timer is stopped; nothing happened.
    Idle,
    /// Timer decremented; payload is the seconds now remaining.
    Running(u32),
    /// The countdown just hit zero on this tick.
    Expired,
}

impl TimerState {
    /// Begin a fresh countdown, discarding any countdown in progress.
    pub fn start(&mut self, seconds: u32) {
        self.seconds = seconds;
        self.max = seconds;
        self.running = true;
    }

    /// Halt the countdown, keeping the remaining seconds.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Continue a paused countdown. No-op once the clock is at zero.
    pub fn resume(&mut self) {
        if self.seconds > 0 {
            self.running = true;
        }
    }

    #[must_use]
    pub const fn fraction_remaining(&self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            self.seconds as f64 / self.max as f64
        }
    }

    /// Advance the countdown by one second.
    pub fn tick_second(&mut self) -> TimerTick {
        if !self.running {
            return TimerTick::Idle;
        }
        self.seconds = self.seconds.saturating_sub(1);
        if self.seconds == 0 {
            self.running = false;
            return TimerTick::Expired;
        }
        TimerTick::Running(self.seconds)
    }
}
