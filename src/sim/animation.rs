//! Looping frame timer
//!
//! An animation is an infinite, restartable sequence of frame indices: the
//! timer advances with the frame delta and wraps modulo the cycle length.
//! There is no terminal state and no "finished" signal.

/// A looping animation over `frame_count` frames, one full cycle every
/// `cycle_secs` seconds.
#[derive(Debug, Clone)]
pub struct Animation {
    frame_count: u32,
    cycle_secs: f32,
    elapsed: f32,
}

impl Animation {
    /// `frame_count` must be at least 1 and `cycle_secs` positive.
    pub fn new(frame_count: u32, cycle_secs: f32) -> Self {
        debug_assert!(frame_count >= 1);
        debug_assert!(cycle_secs > 0.0);
        Self {
            frame_count,
            cycle_secs,
            elapsed: 0.0,
        }
    }

    /// Advance elapsed time by `dt` seconds (`dt >= 0`).
    pub fn step(&mut self, dt: f32) {
        debug_assert!(dt >= 0.0);
        self.elapsed += dt;
    }

    /// Frame index for the current elapsed time, always in
    /// `[0, frame_count)`.
    pub fn current_frame(&self) -> u32 {
        let cycle_pos = self.elapsed.rem_euclid(self.cycle_secs) / self.cycle_secs;
        // cycle_pos can land exactly on 1.0 through rounding
        ((cycle_pos * self.frame_count as f32) as u32).min(self.frame_count - 1)
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }
}
