/// Partition an instruction belongs to.
///
/// Entity instructions are drawn in world space through the camera; UI
/// instructions are drawn afterwards in screen space.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Source {
    Entity,
    Ui,
}
