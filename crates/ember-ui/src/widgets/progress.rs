use ember_engine::coords::Rect;
use ember_engine::paint::Color;

use crate::painter::Painter;
use crate::widget::Widget;

/// A non-interactive horizontal progress bar.
///
/// # Example
/// ```rust,ignore
/// ProgressBar::new()
///     .value(0.7)
///     .fill_color(Color::from_straight(0.1, 0.8, 0.5, 1.0))
/// ```
pub struct ProgressBar {
    /// Current progress in [0, 1].
    value: f32,
    track_color: Color,
    fill_color: Color,
    border: Option<(f32, Color)>,
}

impl ProgressBar {
    pub fn new() -> Self {
        Self {
            value: 0.0,
            track_color: Color::from_straight(0.15, 0.2, 0.3, 1.0),
            fill_color: Color::from_straight(0.2, 0.65, 1.0, 1.0),
            border: None,
        }
    }

    pub fn value(mut self, v: f32) -> Self { self.value = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }; self }
    pub fn track_color(mut self, v: Color) -> Self { self.track_color = v; self }
    pub fn fill_color(mut self, v: Color) -> Self { self.fill_color = v; self }
    pub fn border(mut self, width: f32, color: Color) -> Self { self.border = Some((width, color)); self }
}

impl Default for ProgressBar { fn default() -> Self { Self::new() } }

impl Widget for ProgressBar {
    fn paint(&self, painter: &mut Painter<'_>, rect: Rect) {
        painter.background(rect, self.track_color);

        let fill_w = rect.size.x * self.value;
        if fill_w > 0.0 {
            painter.fill_rect(Rect::new(rect.origin.x, rect.origin.y, fill_w, rect.size.y), self.fill_color);
        }

        if let Some((width, color)) = self.border {
            painter.border(rect, width, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::testing::flush_calls;
    use ember_engine::render::{Call, RenderQueue};

    #[test]
    fn fill_follows_value() {
        let mut q = RenderQueue::new();
        ProgressBar::new()
            .value(0.25)
            .border(1.0, Color::white())
            .paint(&mut Painter::new(&mut q, 0.0), Rect::new(0.0, 0.0, 200.0, 8.0));

        match flush_calls(&mut q).as_slice() {
            [Call::Rectangle(track), Call::RectangleLines(border), Call::Rectangle(fill)] => {
                assert_eq!(track.rect, Rect::new(0.0, 0.0, 200.0, 8.0));
                assert_eq!(border.border_width, 1.0);
                assert_eq!(fill.rect, Rect::new(0.0, 0.0, 50.0, 8.0));
            }
            other => panic!("unexpected calls {other:?}"),
        }
    }

    #[test]
    fn value_is_clamped() {
        let mut q = RenderQueue::new();
        ProgressBar::new().value(-3.0).paint(&mut Painter::new(&mut q, 0.0), Rect::new(0.0, 0.0, 10.0, 2.0));
        assert_eq!(q.len(), 1);

        let mut q = RenderQueue::new();
        ProgressBar::new().value(7.0).paint(&mut Painter::new(&mut q, 0.0), Rect::new(0.0, 0.0, 10.0, 2.0));
        match flush_calls(&mut q).as_slice() {
            [_, Call::Rectangle(fill)] => assert_eq!(fill.rect.size.x, 10.0),
            other => panic!("unexpected calls {other:?}"),
        }
    }
}
