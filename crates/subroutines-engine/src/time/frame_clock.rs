use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds (clamped).
    pub dt: f32,

    /// Sum of all clamped `dt` values, in seconds.
    ///
    /// Animation should use this rather than wall-clock time so a stall (debugger,
    /// minimized window) advances the scene by at most `dt_max`.
    pub elapsed: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped to avoid pathological values when the application is paused
/// by the debugger, minimized, or stalls.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    elapsed: f64,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock clamping dt to `[100µs, 250ms]`.
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            elapsed: 0.0,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the delta-time baseline. `elapsed` and the frame counter are kept.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;
        self.elapsed += dt.as_secs_f64();

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: self.elapsed as f32,
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock_at(start: Instant) -> FrameClock {
        let mut clock = FrameClock::new();
        clock.last = start;
        clock
    }

    #[test]
    fn dt_is_measured_between_ticks() {
        let t0 = Instant::now();
        let mut clock = clock_at(t0);
        let ft = clock.tick_at(t0 + Duration::from_millis(16));
        assert!((ft.dt - 0.016).abs() < 1e-6);
        assert_eq!(ft.frame_index, 0);
    }

    #[test]
    fn dt_is_clamped_to_max_after_stall() {
        let t0 = Instant::now();
        let mut clock = clock_at(t0);
        let ft = clock.tick_at(t0 + Duration::from_secs(5));
        assert!((ft.dt - 0.25).abs() < 1e-6);
    }

    #[test]
    fn dt_is_clamped_to_min() {
        let t0 = Instant::now();
        let mut clock = clock_at(t0);
        let ft = clock.tick_at(t0);
        assert!((ft.dt - 0.0001).abs() < 1e-7);
    }

    #[test]
    fn elapsed_accumulates_clamped_dt() {
        let t0 = Instant::now();
        let mut clock = clock_at(t0);
        clock.tick_at(t0 + Duration::from_millis(100));
        clock.tick_at(t0 + Duration::from_secs(10)); // clamped to 0.25
        let ft = clock.tick_at(t0 + Duration::from_millis(10_050));
        assert!((ft.elapsed - 0.4).abs() < 1e-5, "elapsed = {}", ft.elapsed);
        assert_eq!(ft.frame_index, 2);
    }

    #[test]
    fn custom_clamps_apply() {
        let t0 = Instant::now();
        let mut clock = FrameClock::with_clamps(Duration::from_millis(10), Duration::from_millis(20));
        clock.last = t0;
        assert!((clock.tick_at(t0 + Duration::from_millis(1)).dt - 0.010).abs() < 1e-6);
        assert!((clock.tick_at(t0 + Duration::from_millis(500)).dt - 0.020).abs() < 1e-6);
    }

    #[test]
    fn reset_keeps_elapsed_and_counter() {
        let t0 = Instant::now();
        let mut clock = clock_at(t0);
        clock.tick_at(t0 + Duration::from_millis(50));
        clock.reset();
        let ft = clock.tick();
        assert_eq!(ft.frame_index, 1);
        assert!(ft.elapsed >= 0.05);
    }
}
