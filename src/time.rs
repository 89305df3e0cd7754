//! Fixed-timestep clock.
//!
//! `draw_web()` fires at roughly display rate with a variable delta.
//! `GameTime` turns wall-clock milliseconds into whole ticks, so the escape
//! countdown and chat polling advance deterministically.
//!
//! There is no upper bound on a frame's delta: `requestAnimationFrame` stops
//! while the tab is hidden, and the countdown must still catch up with the
//! wall clock when the player comes back.

pub const TICKS_PER_SEC: u32 = 10;

pub struct GameTime {
    ms_per_tick: f64,
    /// Milliseconds not yet consumed as ticks.
    accumulator: f64,
    last_timestamp: Option<f64>,
}

impl GameTime {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec as f64,
            accumulator: 0.0,
            last_timestamp: None,
        }
    }

    /// Feed `performance.now()`; returns the ticks to run this frame.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            // a clock that runs backwards yields nothing
            Some(prev) => (now_ms - prev).max(0.0),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        ticks
    }
}

/// Render a tick count as `MM:SS`, rounding partial seconds up.
pub fn format_clock(ticks: u32) -> String {
    let secs = ticks.div_ceil(TICKS_PER_SEC);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
