use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick (clamped, or the fixed step).
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Measured { min: Duration, max: Duration },
    Fixed(Duration),
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Measured clocks clamp delta time so a debugger pause or a stalled frame
/// does not feed a huge `dt` into particle updates. Fixed clocks report the
/// same step every tick, which headless runs and tests rely on.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    step: Step,
}

impl FrameClock {
    /// Measured clock with the default clamps (0.1 ms .. 250 ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Measured clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            step: Step::Measured { min: dt_min, max: dt_max },
        }
    }

    /// Clock that advances by exactly `step` every tick.
    pub fn fixed(step: Duration) -> Self {
        Self {
            last: Instant::now(),
            frame_index: 0,
            step: Step::Fixed(step),
        }
    }

    /// Resets the measured baseline.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = match self.step {
            Step::Measured { min, max } => now.saturating_duration_since(self.last).clamp(min, max),
            Step::Fixed(step) => step,
        };
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
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

    #[test]
    fn fixed_clock_reports_constant_step() {
        let mut clock = FrameClock::fixed(Duration::from_millis(20));
        let a = clock.tick();
        let b = clock.tick();
        assert_eq!(a.dt, 0.02);
        assert_eq!(b.dt, 0.02);
        assert_eq!((a.frame_index, b.frame_index), (0, 1));
        assert_eq!(clock.frame_index(), 2);
    }

    #[test]
    fn measured_clock_respects_lower_clamp() {
        let mut clock = FrameClock::with_clamps(Duration::from_millis(5), Duration::from_millis(50));
        let t = clock.tick();
        assert!(t.dt >= 0.005);
        assert!(t.dt <= 0.05);
    }
}
