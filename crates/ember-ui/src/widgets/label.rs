use ember_engine::assets::FontId;
use ember_engine::coords::{Rect, Vec2};
use ember_engine::paint::Color;

use crate::painter::Painter;
use crate::widget::Widget;

/// A single run of text, left-aligned and vertically centered in its rect.
///
/// # Example
/// ```rust,ignore
/// Label::new("Paused", font, 18.0, Color::white()).spacing(1.0)
/// ```
pub struct Label {
    text: String,
    font: FontId,
    size: f32,
    spacing: f32,
    color: Color,
}

impl Label {
    pub fn new(text: impl Into<String>, font: FontId, size: f32, color: Color) -> Self {
        Self { text: text.into(), font, size, spacing: 0.0, color }
    }

    pub fn spacing(mut self, v: f32) -> Self { self.spacing = v; self }
    pub fn color(mut self, v: Color) -> Self { self.color = v; self }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Widget for Label {
    fn paint(&self, painter: &mut Painter<'_>, rect: Rect) {
        if self.text.is_empty() {
            return;
        }
        let y = rect.origin.y + ((rect.size.y - self.size) * 0.5).max(0.0);
        painter.text(
            self.text.clone(),
            self.font,
            self.size,
            self.spacing,
            self.color,
            Vec2::new(rect.origin.x, y),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::testing::flush_calls;
    use ember_engine::render::{Call, RenderQueue};

    #[test]
    fn centers_vertically() {
        let mut q = RenderQueue::new();
        let label = Label::new("hp", FontId::from_raw(0), 10.0, Color::white()).spacing(2.0);
        label.paint(&mut Painter::new(&mut q, 0.0), Rect::new(4.0, 0.0, 100.0, 30.0));

        match flush_calls(&mut q).as_slice() {
            [Call::Text(t)] => {
                assert_eq!(t.text, "hp");
                assert_eq!(t.position, Vec2::new(4.0, 10.0));
                assert_eq!(t.spacing, 2.0);
            }
            other => panic!("unexpected calls {other:?}"),
        }
    }

    #[test]
    fn empty_label_draws_nothing() {
        let mut q = RenderQueue::new();
        Label::new("", FontId::from_raw(0), 10.0, Color::white())
            .paint(&mut Painter::new(&mut q, 0.0), Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(q.is_empty());
    }
}
