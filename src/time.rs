//! Frame timing for external drivers.
//!
//! The engine itself only ever receives a delta time; this helper is for the
//! driver side of the loop, turning wall-clock instants into per-frame deltas
//! with pause support and an optional fixed step for deterministic runs.
//!
//! # Example
//!
//! ```ignore
//! let mut time = Time::new();
//! loop {
//!     let (_, dt) = time.update();
//!     sim.tick(dt);
//! }
//! ```

use std::time::Instant;

/// Wall-clock frame timer.
#[derive(Debug)]
pub struct Time {
    last_frame: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    paused: bool,
    /// Fixed delta time for deterministic updates (optional).
    fixed_delta: Option<f32>,
}

impl Time {
    /// Create a timer starting from now.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            paused: false,
            fixed_delta: None,
        }
    }

    /// Update timing values. Call once per frame.
    ///
    /// Returns `(elapsed_time, delta_time)` for convenience.
    pub fn update(&mut self) -> (f32, f32) {
        let now = Instant::now();

        if self.paused {
            self.delta_secs = 0.0;
            self.last_frame = now;
            return (self.elapsed_secs, 0.0);
        }

        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.delta_secs = self.fixed_delta.unwrap_or(raw_delta);
        self.last_frame = now;
        self.elapsed_secs += self.delta_secs;
        self.frame_count += 1;

        (self.elapsed_secs, self.delta_secs)
    }

    /// Accumulated simulation time in seconds.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Time since the last frame in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Whether time is currently paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause time progression; `update` returns a zero delta while paused.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume time progression after pausing.
    pub fn resume(&mut self) {
        self.last_frame = Instant::now();
        self.paused = false;
    }

    /// Use a fixed delta instead of wall-clock timing. Pass `None` to return
    /// to real frame timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }

    /// Reset to the initial state, keeping any fixed delta setting.
    pub fn reset(&mut self) {
        let fixed = self.fixed_delta;
        *self = Self::new();
        self.fixed_delta = fixed;
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_new_timer_state() {
        let time = Time::new();
        assert_eq!(time.frame(), 0);
        assert!(!time.is_paused());
        assert_eq!(time.elapsed(), 0.0);
    }

    #[test]
    fn test_update_advances() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(5));
        let (elapsed, delta) = time.update();
        assert!(elapsed > 0.0);
        assert!(delta > 0.0);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn test_paused_delta_is_zero() {
        let mut time = Time::new();
        time.update();
        time.pause();
        thread::sleep(Duration::from_millis(5));
        let before = time.elapsed();
        let (_, delta) = time.update();
        assert_eq!(delta, 0.0);
        assert_eq!(time.elapsed(), before);
    }

    #[test]
    fn test_fixed_delta_overrides_wall_clock() {
        let mut time = Time::new();
        time.set_fixed_delta(Some(1.0 / 60.0));
        thread::sleep(Duration::from_millis(20));
        time.update();
        assert!((time.delta() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_fixed_delta_accumulates_elapsed() {
        let mut time = Time::new();
        time.set_fixed_delta(Some(0.5));
        time.update();
        time.update();
        assert!((time.elapsed() - 1.0).abs() < 1e-6);
    }
}
