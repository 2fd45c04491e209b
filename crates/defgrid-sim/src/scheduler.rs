//! Fixed-timestep scheduler.
//!
//! Converts host frame time into a whole number of simulation ticks so the
//! simulation advances at `TICK_RATE` regardless of the host's refresh rate.

use std::time::Duration;

use defgrid_core::constants::TICK_RATE;

/// Most ticks run for a single frame; any larger backlog is dropped.
pub const MAX_TICKS_PER_FRAME: u32 = 8;

/// Accumulator that hands out fixed-length ticks.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: Duration,
    accumulated: Duration,
    max_ticks_per_frame: u32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(TICK_RATE)
    }
}

impl FixedTimestep {
    /// Scheduler at `rate` ticks per second.
    pub fn new(rate: u32) -> Self {
        Self {
            step: Duration::from_nanos(1_000_000_000 / rate.max(1) as u64),
            accumulated: Duration::ZERO,
            max_ticks_per_frame: MAX_TICKS_PER_FRAME,
        }
    }

    /// Length of one tick.
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Add elapsed frame time and return how many ticks are now due.
    ///
    /// When more than `MAX_TICKS_PER_FRAME` ticks are due, the excess is
    /// discarded to avoid a catch-up spiral.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;
        let mut ticks = 0;
        while self.accumulated >= self.step {
            self.accumulated -= self.step;
            ticks += 1;
            if ticks == self.max_ticks_per_frame {
                self.accumulated = Duration::ZERO;
                break;
            }
        }
        ticks
    }

    /// Fraction of a tick left over in the accumulator (0.0..1.0).
    pub fn alpha(&self) -> f64 {
        self.accumulated.as_secs_f64() / self.step.as_secs_f64()
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}
