//! Fixed-delay tick scheduling and the speed ramp.

use std::time::Duration;

use bevy::prelude::*;

/// One-shot timer re-armed after every tick with the interval current at that moment,
/// so a speed change applies to the very next tick.
///
/// A frame that overshoots the delay still yields a single tick; the excess is dropped.
#[derive(Debug, Clone)]
pub struct Scheduler {
    timer: Timer,
    armed: bool,
}

impl Default for Scheduler {
    fn default() -> Self {
        Scheduler {
            timer: Timer::new(Duration::ZERO, TimerMode::Once),
            armed: false,
        }
    }
}

impl Scheduler {
    /// Schedules the next tick `delay` from now, replacing any pending one.
    pub fn arm(&mut self, delay: Duration) {
        self.timer.set_duration(delay);
        self.timer.reset();
        self.armed = true;
    }

    /// Drops the pending tick, if any.
    pub fn cancel(&mut self) {
        self.armed = false;
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Advances time; true when the pending tick is due. The caller runs the tick and re-arms.
    pub fn poll(&mut self, delta: Duration) -> bool {
        if !self.armed {
            return false;
        }
        if self.timer.tick(delta).just_finished() {
            self.armed = false;
            return true;
        }
        false
    }
}

/// Tick interval shrinks by a fixed step per pickup down to a floor. It never grows within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedRamp {
    pub initial: Duration,
    pub floor: Duration,
    pub step: Duration,
}

impl SpeedRamp {
    pub fn next(&self, current: Duration) -> Duration {
        if current <= self.floor {
            return current;
        }
        current.saturating_sub(self.step).max(self.floor)
    }
}
