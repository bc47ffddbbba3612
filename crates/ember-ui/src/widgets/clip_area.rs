use ember_engine::coords::Rect;

use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// Paints its child clipped to the allocated rect.
///
/// The child's draws are captured into one scissor scope and replay in the
/// order the child issued them.
pub struct ClipArea {
    child: Element,
}

impl ClipArea {
    pub fn new(child: impl Into<Element>) -> Self {
        Self { child: child.into() }
    }
}

impl Widget for ClipArea {
    fn paint(&self, painter: &mut Painter<'_>, rect: Rect) {
        painter.clip(rect, |p| self.child.paint(p, rect));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::testing::flush_calls;
    use crate::widgets::{Panel, ProgressBar};
    use ember_engine::paint::Color;
    use ember_engine::render::{Call, RenderQueue};

    #[test]
    fn child_is_wrapped_in_scissor() {
        let area = ClipArea::new(ProgressBar::new().value(0.5));
        let rect = Rect::new(10.0, 10.0, 40.0, 4.0);

        let mut q = RenderQueue::new();
        area.paint(&mut Painter::new(&mut q, 0.0), rect);
        assert_eq!(q.len(), 1);

        match flush_calls(&mut q).as_slice() {
            [Call::BeginScissor(r), Call::Rectangle(_), Call::Rectangle(_), Call::EndScissor] => {
                assert_eq!(*r, rect);
            }
            other => panic!("unexpected calls {other:?}"),
        }
    }

    #[test]
    fn clip_scope_sorts_as_content() {
        let bg = Color::from_straight(0.2, 0.2, 0.2, 1.0);
        let panel = Panel::new()
            .background(bg)
            .child(ClipArea::new(Panel::new().background(Color::white())));

        let mut q = RenderQueue::new();
        panel.paint(&mut Painter::new(&mut q, 0.0), Rect::new(0.0, 0.0, 10.0, 10.0));
        let calls = flush_calls(&mut q);

        assert!(matches!(&calls[0], Call::Rectangle(r) if r.color == bg));
        assert!(matches!(calls[1], Call::BeginScissor(_)));
        assert_eq!(q.stats().ui, 2);
    }
}
