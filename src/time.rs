//! Frame timing.
//!
//! Wave time is not wall-clock time: it advances by a fixed [`TIME_STEP`]
//! per rendered frame, so the animation speed follows the display refresh
//! rate. Wall-clock time is only used for the FPS readout.
//!
//! # Example
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//!
//! // In the redraw handler:
//! let time = clock.tick(); // 0.0, 0.05, 0.1, ...
//! println!("FPS: {:.1}", clock.fps());
//! ```

use std::time::{Duration, Instant};

/// Wave time added per frame.
pub const TIME_STEP: f32 = 0.05;

/// Fixed-step wave time plus frame statistics.
#[derive(Debug)]
pub struct FrameClock {
    /// Wave time uploaded on the next tick.
    wave_time: f32,
    /// Wave time added per tick.
    step: f32,
    /// Total ticks since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_step(TIME_STEP)
    }

    /// Clock advancing by `step` per tick.
    pub fn with_step(step: f32) -> Self {
        Self {
            wave_time: 0.0,
            step,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: Instant::now(),
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Advance one frame. Call once per rendered frame.
    ///
    /// Returns the wave time for this frame, starting at `0.0`.
    pub fn tick(&mut self) -> f32 {
        let time = self.wave_time;
        self.wave_time += self.step;
        self.frame_count += 1;

        let now = Instant::now();
        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        time
    }

    /// Wave time that the next tick will return.
    #[inline]
    pub fn wave_time(&self) -> f32 {
        self.wave_time
    }

    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
