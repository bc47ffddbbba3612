use ember_engine::coords::Rect;

use crate::painter::Painter;

/// The trait every UI component implements.
///
/// # Implementing a custom widget
///
/// ```rust,ignore
/// use ember_ui::prelude::*;
///
/// pub struct Swatch { color: Color }
///
/// impl Widget for Swatch {
///     fn paint(&self, painter: &mut Painter, rect: Rect) {
///         painter.fill_rect(rect, self.color);
///     }
/// }
/// ```
pub trait Widget: 'static {
    /// Draws this widget into `painter` within `rect`.
    ///
    /// `rect` is the space allocated by the parent. Children are painted by
    /// calling their own `paint` with a sub-rect.
    fn paint(&self, painter: &mut Painter<'_>, rect: Rect);
}

/// A type-erased widget, the child type of container widgets.
pub struct Element(Box<dyn Widget>);

impl Element {
    pub fn new<W: Widget>(w: W) -> Self {
        Self(Box::new(w))
    }

    #[inline]
    pub fn paint(&self, painter: &mut Painter<'_>, rect: Rect) {
        self.0.paint(painter, rect)
    }
}

impl<W: Widget> From<W> for Element {
    fn from(w: W) -> Self {
        Self::new(w)
    }
}
