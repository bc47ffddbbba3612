use ember_engine::coords::Rect;
use ember_engine::paint::Color;

use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// A single-child box with optional background, border, padding and overlay.
///
/// All properties are optional; an empty `Panel` draws nothing.
///
/// # Example
/// ```rust,ignore
/// Panel::new()
///     .background(Color::from_straight(0.1, 0.1, 0.15, 1.0))
///     .border(1.0, Color::from_straight(0.3, 0.3, 0.35, 1.0))
///     .padding(12.0)
///     .child(Label::new("hello", font, 14.0, Color::white()))
/// ```
pub struct Panel {
    child: Option<Element>,
    padding: f32,
    background: Option<Color>,
    border: Option<(f32, Color)>,
    overlay: Option<Color>,
}

impl Panel {
    pub fn new() -> Self {
        Self { child: None, padding: 0.0, background: None, border: None, overlay: None }
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.child = Some(child.into());
        self
    }

    pub fn padding(mut self, v: f32) -> Self {
        self.padding = v.max(0.0);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn border(mut self, width: f32, color: Color) -> Self {
        self.border = Some((width, color));
        self
    }

    /// Tint drawn over the panel and its child, e.g. to dim a disabled section.
    pub fn overlay(mut self, color: Color) -> Self {
        self.overlay = Some(color);
        self
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Panel {
    fn paint(&self, painter: &mut Painter<'_>, rect: Rect) {
        if let Some(color) = self.background {
            painter.background(rect, color);
        }
        if let Some((width, color)) = self.border {
            painter.border(rect, width, color);
        }
        if let Some(child) = &self.child {
            child.paint(painter, rect.inset(self.padding));
        }
        if let Some(color) = self.overlay {
            painter.overlay(rect, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::testing::flush_calls;
    use crate::widgets::ProgressBar;
    use ember_engine::render::{Call, RenderQueue};

    #[test]
    fn nested_panels_paint_by_pass() {
        let outer_bg = Color::from_straight(1.0, 0.0, 0.0, 1.0);
        let inner_bg = Color::from_straight(0.0, 1.0, 0.0, 1.0);
        let dim = Color::from_straight(0.0, 0.0, 0.0, 0.5);

        let panel = Panel::new()
            .background(outer_bg)
            .border(2.0, Color::white())
            .padding(4.0)
            .overlay(dim)
            .child(Panel::new().background(inner_bg).child(ProgressBar::new().value(1.0)));

        let mut q = RenderQueue::new();
        panel.paint(&mut Painter::new(&mut q, 0.0), Rect::new(0.0, 0.0, 100.0, 20.0));
        let calls = flush_calls(&mut q);

        let kinds: Vec<_> = calls
            .iter()
            .map(|c| match c {
                Call::Rectangle(r) if r.color == outer_bg => "outer-bg",
                Call::Rectangle(r) if r.color == inner_bg => "inner-bg",
                Call::Rectangle(r) if r.color == dim => "overlay",
                Call::Rectangle(_) => "bar",
                Call::RectangleLines(_) => "border",
                other => panic!("unexpected call {other:?}"),
            })
            .collect();
        // Track (background pass) lands with the panel backgrounds; the fill is content.
        assert_eq!(kinds, ["outer-bg", "inner-bg", "bar", "border", "bar", "overlay"]);

        match &calls[1] {
            Call::Rectangle(r) => assert_eq!(r.rect, Rect::new(4.0, 4.0, 92.0, 12.0)),
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn empty_panel_is_a_no_op() {
        let mut q = RenderQueue::new();
        Panel::new().paint(&mut Painter::new(&mut q, 0.0), Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(q.is_empty());
    }
}
