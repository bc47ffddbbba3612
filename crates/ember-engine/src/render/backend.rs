use crate::assets::ShaderId;
use crate::coords::Rect;
use crate::paint::Color;

use super::ops::{CircleLinesCmd, RectangleCmd, RectangleLinesCmd, TextCmd, TextureCmd};
use super::Camera2D;

/// Native draw layer the queue replays into at flush time.
///
/// Calls arrive in paint order. `begin_*` / `end_*` pairs are always balanced
/// and properly nested; the camera bracket never contains UI draws.
pub trait Backend {
    /// Clears the target. Called by the frame driver before the flush.
    fn clear(&mut self, color: Color);

    fn begin_camera(&mut self, camera: &Camera2D);
    fn end_camera(&mut self);

    fn draw_rectangle(&mut self, cmd: &RectangleCmd);
    fn draw_rectangle_lines(&mut self, cmd: &RectangleLinesCmd);
    fn draw_circle_lines(&mut self, cmd: &CircleLinesCmd);
    fn draw_texture(&mut self, cmd: &TextureCmd);
    fn draw_text(&mut self, cmd: &TextCmd);

    fn begin_shader_mode(&mut self, shader: ShaderId);
    fn end_shader_mode(&mut self);

    fn begin_scissor_mode(&mut self, rect: Rect);
    fn end_scissor_mode(&mut self);
}

/// A backend call as seen by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Clear(Color),
    BeginCamera(Camera2D),
    EndCamera,
    Rectangle(RectangleCmd),
    RectangleLines(RectangleLinesCmd),
    CircleLines(CircleLinesCmd),
    Texture(TextureCmd),
    Text(TextCmd),
    BeginShader(ShaderId),
    EndShader,
    BeginScissor(Rect),
    EndScissor,
}

impl Call {
    /// `true` for leaf draw calls (everything except clears and brackets).
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            Call::Rectangle(_)
                | Call::RectangleLines(_)
                | Call::CircleLines(_)
                | Call::Texture(_)
                | Call::Text(_)
        )
    }
}

/// One recorded call plus whether the camera bracket was open at the time.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub call: Call,
    pub camera_active: bool,
}

/// Backend that records calls instead of drawing.
///
/// Checks bracket discipline as it goes and panics on an unbalanced or
/// mis-nested `end_*`, so tests catch replay bugs at the offending call.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<RecordedCall>,
    camera_active: bool,
    brackets: Vec<Bracket>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Bracket {
    Shader,
    Scissor,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }

    /// Leaf draw calls only, in execution order.
    pub fn draws(&self) -> impl Iterator<Item = &RecordedCall> {
        self.calls.iter().filter(|c| c.call.is_draw())
    }

    /// Drains the recording, keeping bracket state.
    pub fn take(&mut self) -> Vec<RecordedCall> {
        std::mem::take(&mut self.calls)
    }

    fn record(&mut self, call: Call) {
        self.calls.push(RecordedCall { call, camera_active: self.camera_active });
    }

    fn close(&mut self, expected: Bracket) {
        let top = self.brackets.pop();
        assert_eq!(top, Some(expected), "end_{expected:?} does not match the innermost open bracket");
    }
}

impl Backend for RecordingBackend {
    fn clear(&mut self, color: Color) {
        self.record(Call::Clear(color));
    }

    fn begin_camera(&mut self, camera: &Camera2D) {
        assert!(!self.camera_active, "begin_camera while the camera is already active");
        assert!(self.brackets.is_empty(), "begin_camera inside a mode scope");
        self.camera_active = true;
        self.record(Call::BeginCamera(*camera));
    }

    fn end_camera(&mut self) {
        assert!(self.camera_active, "end_camera without begin_camera");
        assert!(self.brackets.is_empty(), "end_camera inside a mode scope");
        self.camera_active = false;
        self.record(Call::EndCamera);
    }

    fn draw_rectangle(&mut self, cmd: &RectangleCmd) {
        self.record(Call::Rectangle(cmd.clone()));
    }

    fn draw_rectangle_lines(&mut self, cmd: &RectangleLinesCmd) {
        self.record(Call::RectangleLines(cmd.clone()));
    }

    fn draw_circle_lines(&mut self, cmd: &CircleLinesCmd) {
        self.record(Call::CircleLines(cmd.clone()));
    }

    fn draw_texture(&mut self, cmd: &TextureCmd) {
        self.record(Call::Texture(cmd.clone()));
    }

    fn draw_text(&mut self, cmd: &TextCmd) {
        self.record(Call::Text(cmd.clone()));
    }

    fn begin_shader_mode(&mut self, shader: ShaderId) {
        self.brackets.push(Bracket::Shader);
        self.record(Call::BeginShader(shader));
    }

    fn end_shader_mode(&mut self) {
        self.close(Bracket::Shader);
        self.record(Call::EndShader);
    }

    fn begin_scissor_mode(&mut self, rect: Rect) {
        self.brackets.push(Bracket::Scissor);
        self.record(Call::BeginScissor(rect));
    }

    fn end_scissor_mode(&mut self) {
        self.close(Bracket::Scissor);
        self.record(Call::EndScissor);
    }
}
