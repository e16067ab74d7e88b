//! Simulation clock with variable-rate playback
//!
//! Tracks elapsed simulation time as a monotonic accumulator decoupled from
//! the wall clock. The host ticks it once per rendered frame.

use crate::error::{SimError, SimResult};
use parking_lot::Mutex;
use std::sync::Arc;

/// Playback clock: elapsed sim time, speed multiplier, paused flag
///
/// Speed survives pause/play. Zero speed and paused are distinct states: the
/// UI shows them differently even though both freeze time.
#[derive(Clone, Debug)]
pub struct SimulationClock {
    time: f64,
    speed: f64,
    paused: bool,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self { time: 0.0, speed: 1.0, paused: false }
    }

    /// Start at a specific simulation time
    pub fn at_time(time: f64) -> Self {
        let mut clock = Self::new();
        clock.scrub_to(time);
        clock
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Resume at the last set speed (1.0 if never set)
    pub fn play(&mut self) {
        self.paused = false;
    }

    /// Freeze time without touching the speed
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Set the speed multiplier (sim-time units per real second)
    ///
    /// May be negative (rewind) or zero. Non-finite input is rejected and
    /// the clock is left unchanged.
    pub fn set_speed(&mut self, speed: f64) -> SimResult<()> {
        if !speed.is_finite() {
            return Err(SimError::InvalidArgument(format!(
                "speed must be finite, got {}",
                speed
            )));
        }
        self.speed = speed;
        Ok(())
    }

    /// Advance by real elapsed seconds; no-op while paused. Returns the
    /// current simulation time.
    pub fn advance(&mut self, real_dt_seconds: f64) -> f64 {
        if self.paused {
            return self.time;
        }
        self.time += real_dt_seconds * self.speed;
        self.time
    }

    /// Jump to an absolute simulation time, preserving paused/running mode
    /// (used by the date picker).
    pub fn scrub_to(&mut self, time: f64) {
        self.time = time;
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Clock handle shared across threads; every operation is a short critical
/// section, nothing blocks while holding the lock.
#[derive(Clone)]
pub struct SharedClock {
    inner: Arc<Mutex<SimulationClock>>,
}

impl SharedClock {
    pub fn new(clock: SimulationClock) -> Self {
        Self { inner: Arc::new(Mutex::new(clock)) }
    }

    pub fn time(&self) -> f64 {
        self.inner.lock().time()
    }

    pub fn speed(&self) -> f64 {
        self.inner.lock().speed()
    }

    pub fn is_paused(&self) -> bool {
        self.inner.lock().is_paused()
    }

    pub fn play(&self) {
        self.inner.lock().play();
    }

    pub fn pause(&self) {
        self.inner.lock().pause();
    }

    pub fn toggle_pause(&self) {
        self.inner.lock().toggle_pause();
    }

    pub fn set_speed(&self, speed: f64) -> SimResult<()> {
        self.inner.lock().set_speed(speed)
    }

    pub fn advance(&self, real_dt_seconds: f64) -> f64 {
        self.inner.lock().advance(real_dt_seconds)
    }

    pub fn scrub_to(&self, time: f64) {
        self.inner.lock().scrub_to(time);
    }
}

impl Default for SharedClock {
    fn default() -> Self {
        Self::new(SimulationClock::new())
    }
}

/// Preset speeds (sim-time units per real second)
pub mod speeds {
    use orrery_core::constants::{DAYS_PER_YEAR, SIM_UNITS_PER_YEAR};

    /// One sim day per real second
    pub const DAY_PER_SEC: f64 = SIM_UNITS_PER_YEAR / DAYS_PER_YEAR;
    /// One sim week per real second
    pub const WEEK_PER_SEC: f64 = 7.0 * DAY_PER_SEC;
    /// One sim month (~30 days) per real second
    pub const MONTH_PER_SEC: f64 = 30.0 * DAY_PER_SEC;
    /// One sim year per real second
    pub const YEAR_PER_SEC: f64 = SIM_UNITS_PER_YEAR;
    /// Ten sim years per real second
    pub const DECADE_PER_SEC: f64 = 10.0 * SIM_UNITS_PER_YEAR;
}
