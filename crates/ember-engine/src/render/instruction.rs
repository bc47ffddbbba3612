use super::ops::{
    CircleLinesCmd, RectangleCmd, RectangleLinesCmd, ScissorModeCmd, ShaderModeCmd, TextCmd,
    TextureCmd,
};
use super::{SortKey, Source};

/// One deferred draw operation.
///
/// Built only by the `RenderQueue` enqueue helpers; immutable afterwards and
/// executed exactly once by the flush that drains it.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub key: SortKey,
    pub source: Source,
    pub cmd: DrawCmd,
}

/// Closed set of draw operations.
///
/// Extending the queue:
/// - add a payload module under `render::ops::*` with its enqueue helper
/// - add a variant here
/// - add the matching `Backend` method and dispatch it in `flush`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rectangle(RectangleCmd),
    RectangleLines(RectangleLinesCmd),
    CircleLines(CircleLinesCmd),
    Texture(TextureCmd),
    Text(TextCmd),
    ShaderMode(ShaderModeCmd),
    ScissorMode(ScissorModeCmd),
}

impl DrawCmd {
    /// Nested instructions of a mode scope; empty for leaf draws.
    #[inline]
    pub fn children(&self) -> &[Instruction] {
        match self {
            DrawCmd::ShaderMode(m) => &m.children,
            DrawCmd::ScissorMode(m) => &m.children,
            _ => &[],
        }
    }

    #[inline]
    pub fn is_scope(&self) -> bool {
        matches!(self, DrawCmd::ShaderMode(_) | DrawCmd::ScissorMode(_))
    }
}

impl Instruction {
    /// Number of leaf draws in this instruction, including nested scopes.
    pub fn leaf_count(&self) -> usize {
        if self.cmd.is_scope() {
            self.cmd.children().iter().map(Instruction::leaf_count).sum()
        } else {
            1
        }
    }
}
