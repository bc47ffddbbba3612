use crate::assets::ShaderId;
use crate::coords::Rect;
use crate::render::{DrawCmd, Instruction, Layer, RenderQueue, Source};

use super::{check_rect, check_scalar};

/// Shader mode scope: children are drawn with `shader` bound.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderModeCmd {
    pub shader: ShaderId,
    /// Captured draws, replayed in enqueue order.
    pub children: Vec<Instruction>,
}

/// Scissor mode scope: children are clipped to `rect` (screen space).
#[derive(Debug, Clone, PartialEq)]
pub struct ScissorModeCmd {
    pub rect: Rect,
    /// Captured draws, replayed in enqueue order.
    pub children: Vec<Instruction>,
}

impl RenderQueue {
    /// Captures everything `f` enqueues into a single shader-mode instruction.
    ///
    /// The scope is sorted against its siblings by `source` / `layer` as one
    /// unit. Its children keep their enqueue order and are never compared
    /// with instructions outside the scope. Scopes may nest to any depth.
    pub fn shader_mode<F>(&mut self, shader: ShaderId, source: Source, layer: impl Into<Layer>, f: F)
    where
        F: FnOnce(&mut RenderQueue),
    {
        let layer = layer.into();
        check_scalar("shader_mode", "z", layer.z);
        let children = self.capture(f);
        self.push(source, layer, DrawCmd::ShaderMode(ShaderModeCmd { shader, children }));
    }

    /// Captures everything `f` enqueues into a single scissor-mode instruction.
    ///
    /// Same ordering rules as [`shader_mode`](Self::shader_mode).
    pub fn scissor_mode<F>(&mut self, rect: Rect, source: Source, layer: impl Into<Layer>, f: F)
    where
        F: FnOnce(&mut RenderQueue),
    {
        check_rect("scissor_mode", "rect", rect);
        let layer = layer.into();
        check_scalar("scissor_mode", "z", layer.z);
        let children = self.capture(f);
        self.push(source, layer, DrawCmd::ScissorMode(ScissorModeCmd { rect, children }));
    }
}
