use web_time::{Duration, Instant};

/// Fixed-rate frame pacing for the headless playback loop.
///
/// Tracks a smoothed FPS and how long the caller should wait before the
/// next frame is due.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// Last frame timestamp
    last_frame: Instant,
    /// Frames completed so far
    frames: u64,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a frame timer with the given FPS target (0 = unlimited),
    /// starting its clock at `now`.
    pub fn new(target_fps: u32, now: Instant) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_nanos(1_000_000_000 / u64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            target_fps,
            min_frame_duration,
            last_frame: now,
            frames: 0,
            smoothed_fps: target_fps.max(1) as f32,
            smoothing: 0.05,
        }
    }

    /// Time left at `now` before the next frame is due.
    pub fn until_next(&self, now: Instant) -> Duration {
        if self.target_fps == 0 {
            return Duration::ZERO;
        }
        self.min_frame_duration
            .saturating_sub(now.saturating_duration_since(self.last_frame))
    }

    /// Whether a frame is due at `now`.
    pub fn should_render(&self, now: Instant) -> bool {
        self.until_next(now).is_zero()
    }

    /// Record a completed frame at `now` and return the time since the
    /// previous one.
    pub fn end_frame(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frames += 1;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        elapsed
    }

    /// Smoothed FPS.
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Frames recorded by [`end_frame`](Self::end_frame).
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
