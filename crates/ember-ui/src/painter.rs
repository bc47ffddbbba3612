use ember_engine::assets::{FontId, ShaderId, TextureId};
use ember_engine::coords::{Rect, Vec2};
use ember_engine::paint::Color;
use ember_engine::render::{Layer, RenderQueue, Source};

/// Draw passes within one UI layer, in paint order.
///
/// Everything a widget tree paints shares the painter's `z`; the pass decides
/// the order instead. All backgrounds are drawn first, then all borders, then
/// content, then overlays, independently of how deeply the widgets nest.
pub mod pass {
    pub const BACKGROUND: u16 = 0;
    pub const BORDER: u16 = 1;
    pub const CONTENT: u16 = 2;
    pub const OVERLAY: u16 = 3;
}

/// Drawing surface passed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Wraps the render queue at a base z-layer. Inside [`clip`](Self::clip) and
/// [`shader`](Self::shader) the draws are captured into a mode scope, where
/// they replay in call order and passes no longer reorder them.
pub struct Painter<'a> {
    queue: &'a mut RenderQueue,
    z: f32,
}

impl<'a> Painter<'a> {
    pub fn new(queue: &'a mut RenderQueue, z: f32) -> Self {
        assert!(z.is_finite(), "Painter::new: z must be finite, got {z}");
        Self { queue, z }
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.z
    }

    #[inline]
    fn layer(&self, pass: u16) -> Layer {
        Layer::new(self.z).with_pass(pass)
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Solid rectangle in the background pass.
    pub fn background(&mut self, rect: Rect, color: Color) {
        let layer = self.layer(pass::BACKGROUND);
        self.queue.fill_rectangle(rect, color, Source::Ui, layer);
    }

    /// Outline in the border pass, stroked inside `rect`.
    pub fn border(&mut self, rect: Rect, width: f32, color: Color) {
        let layer = self.layer(pass::BORDER);
        self.queue.draw_rectangle_lines(rect, width, color, Source::Ui, layer);
    }

    /// Solid rectangle in the content pass.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let layer = self.layer(pass::CONTENT);
        self.queue.fill_rectangle(rect, color, Source::Ui, layer);
    }

    /// Outline in the content pass.
    pub fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color) {
        let layer = self.layer(pass::CONTENT);
        self.queue.draw_rectangle_lines(rect, width, color, Source::Ui, layer);
    }

    /// Text with its top-left corner at `position`.
    pub fn text(
        &mut self,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        spacing: f32,
        color: Color,
        position: Vec2,
    ) {
        let layer = self.layer(pass::CONTENT);
        self.queue.draw_text(font, text, position, Vec2::zero(), 0.0, size, spacing, color, Source::Ui, layer);
    }

    /// Texture region `src` stretched over `dst`.
    pub fn image(&mut self, texture: TextureId, src: Rect, dst: Rect, tint: Color) {
        let layer = self.layer(pass::CONTENT);
        self.queue.draw_texture(texture, src, dst, Vec2::zero(), 0.0, tint, Source::Ui, layer);
    }

    /// Solid rectangle in the overlay pass, drawn above all content.
    pub fn overlay(&mut self, rect: Rect, color: Color) {
        let layer = self.layer(pass::OVERLAY);
        self.queue.fill_rectangle(rect, color, Source::Ui, layer);
    }

    // ── scopes ────────────────────────────────────────────────────────────

    /// Paints `f` clipped to `rect`, as one content-pass unit.
    pub fn clip<F>(&mut self, rect: Rect, f: F)
    where
        F: FnOnce(&mut Painter<'_>),
    {
        let (layer, z) = (self.layer(pass::CONTENT), self.z);
        self.queue.scissor_mode(rect, Source::Ui, layer, |q| f(&mut Painter::new(q, z)));
    }

    /// Paints `f` with `shader` bound, as one content-pass unit.
    pub fn shader<F>(&mut self, shader: ShaderId, f: F)
    where
        F: FnOnce(&mut Painter<'_>),
    {
        let (layer, z) = (self.layer(pass::CONTENT), self.z);
        self.queue.shader_mode(shader, Source::Ui, layer, |q| f(&mut Painter::new(q, z)));
    }

    /// Paints `f` on a layer `dz` above this one, e.g. for popups.
    pub fn raised<F>(&mut self, dz: f32, f: F)
    where
        F: FnOnce(&mut Painter<'_>),
    {
        f(&mut Painter::new(self.queue, self.z + dz));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_engine::render::{Call, Camera2D, RecordingBackend};

    fn colors(backend: &RecordingBackend) -> Vec<f32> {
        backend
            .draws()
            .map(|c| match &c.call {
                Call::Rectangle(r) => r.color.a,
                Call::RectangleLines(r) => r.color.a,
                other => panic!("unexpected call {other:?}"),
            })
            .collect()
    }

    fn alpha(a: f32) -> Color {
        Color::from_straight(1.0, 1.0, 1.0, a)
    }

    #[test]
    fn passes_order_draws_within_a_layer() {
        let mut q = RenderQueue::new();
        {
            let mut p = Painter::new(&mut q, 0.0);
            let r = Rect::new(0.0, 0.0, 10.0, 10.0);
            p.overlay(r, alpha(0.4));
            p.fill_rect(r, alpha(0.3));
            p.border(r, 1.0, alpha(0.2));
            p.background(r, alpha(0.1));
        }
        let mut backend = RecordingBackend::new();
        q.flush(&Camera2D::default(), &mut backend);
        assert_eq!(colors(&backend), [0.1, 0.2, 0.3, 0.4]);
        assert!(backend.draws().all(|c| !c.camera_active));
    }

    #[test]
    fn raised_layer_draws_after_base_overlay() {
        let mut q = RenderQueue::new();
        {
            let mut p = Painter::new(&mut q, 0.0);
            let r = Rect::new(0.0, 0.0, 10.0, 10.0);
            p.raised(1.0, |p| p.background(r, alpha(0.9)));
            p.overlay(r, alpha(0.5));
        }
        let mut backend = RecordingBackend::new();
        q.flush(&Camera2D::default(), &mut backend);
        assert_eq!(colors(&backend), [0.5, 0.9]);
    }

    #[test]
    fn clip_keeps_call_order_inside_scope() {
        let mut q = RenderQueue::new();
        let clip = Rect::new(0.0, 0.0, 5.0, 5.0);
        {
            let mut p = Painter::new(&mut q, 0.0);
            p.clip(clip, |p| {
                p.overlay(Rect::new(0.0, 0.0, 1.0, 1.0), alpha(0.4));
                p.background(Rect::new(0.0, 0.0, 1.0, 1.0), alpha(0.1));
            });
        }
        let mut backend = RecordingBackend::new();
        q.flush(&Camera2D::default(), &mut backend);

        let calls: Vec<_> = backend
            .calls()
            .iter()
            .map(|c| c.call.clone())
            .filter(|c| !matches!(c, Call::BeginCamera(_) | Call::EndCamera))
            .collect();
        assert_eq!(calls.first(), Some(&Call::BeginScissor(clip)));
        assert_eq!(calls.last(), Some(&Call::EndScissor));
        assert_eq!(colors(&backend), [0.4, 0.1]);
    }
}
