//! Per-frame driver: clock tick, draw callback, clear, flush.

use std::time::Duration;

use crate::paint::Color;
use crate::render::{Backend, Camera2D, FrameStats, RenderQueue};
use crate::time::{FrameClock, FrameTime};

/// Frame driver settings.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameConfig {
    pub clear_color: Color,
    pub dt_min: Duration,
    pub dt_max: Duration,
    /// Report this step every frame instead of measuring wall time.
    pub fixed_step: Option<Duration>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            clear_color: Color::from_srgb_u8(24, 24, 28, 255),
            dt_min: Duration::from_micros(100),
            dt_max: Duration::from_millis(250),
            fixed_step: None,
        }
    }
}

/// Owns the frame's [`RenderQueue`] and clock.
#[derive(Debug)]
pub struct FrameDriver {
    queue: RenderQueue,
    clock: FrameClock,
    config: FrameConfig,
    stats: FrameStats,
}

impl FrameDriver {
    pub fn new(config: FrameConfig) -> Self {
        let clock = match config.fixed_step {
            Some(step) => FrameClock::fixed(step),
            None => FrameClock::with_clamps(config.dt_min, config.dt_max),
        };
        Self { queue: RenderQueue::new(), clock, config, stats: FrameStats::default() }
    }

    #[inline]
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Counters of the last completed frame.
    #[inline]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Index the next frame will run with.
    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.clock.frame_index()
    }

    /// Runs one frame.
    ///
    /// `draw` enqueues into the queue; afterwards the backend is cleared to
    /// the configured color and the queue is flushed into it.
    pub fn run_frame<B, F>(&mut self, backend: &mut B, camera: &Camera2D, draw: F) -> FrameStats
    where
        B: Backend + ?Sized,
        F: FnOnce(&mut RenderQueue, FrameTime),
    {
        let time = self.clock.tick();
        draw(&mut self.queue, time);

        backend.clear(self.config.clear_color);
        self.stats = self.queue.flush(camera, backend);

        log::trace!(
            "frame {} done: {} instructions, dt {:.4}s",
            time.frame_index,
            self.stats.total,
            time.dt
        );
        self.stats
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(FrameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::render::{Call, RecordingBackend, Source};

    fn fixed() -> FrameDriver {
        FrameDriver::new(FrameConfig {
            fixed_step: Some(Duration::from_millis(16)),
            ..FrameConfig::default()
        })
    }

    #[test]
    fn run_frame_clears_then_flushes() {
        let mut driver = fixed();
        let mut backend = RecordingBackend::new();

        let stats = driver.run_frame(&mut backend, &Camera2D::default(), |q, _| {
            q.fill_rectangle(Rect::new(0.0, 0.0, 1.0, 1.0), Color::white(), Source::Entity, 0.0);
            q.fill_rectangle(Rect::new(0.0, 0.0, 1.0, 1.0), Color::white(), Source::Ui, 0.0);
        });

        assert_eq!(stats, FrameStats { total: 2, entity: 1, ui: 1 });
        assert_eq!(driver.stats(), stats);
        assert_eq!(backend.calls()[0].call, Call::Clear(driver.config().clear_color));
    }

    #[test]
    fn frames_advance_with_fixed_step() {
        let mut driver = fixed();
        let mut backend = RecordingBackend::new();
        let mut seen = Vec::new();

        for _ in 0..3 {
            driver.run_frame(&mut backend, &Camera2D::default(), |_, t| {
                seen.push((t.frame_index, t.dt));
            });
        }

        assert_eq!(seen, [(0, 0.016), (1, 0.016), (2, 0.016)]);
        assert_eq!(driver.frame_index(), 3);
    }

    #[test]
    fn empty_frame_reports_zero() {
        let mut driver = fixed();
        let mut backend = RecordingBackend::new();
        driver.run_frame(&mut backend, &Camera2D::default(), |q, _| {
            q.fill_rectangle(Rect::new(0.0, 0.0, 1.0, 1.0), Color::white(), Source::Ui, 0.0);
        });

        let stats = driver.run_frame(&mut backend, &Camera2D::default(), |_, _| {});
        assert_eq!(stats, FrameStats::default());
    }
}
