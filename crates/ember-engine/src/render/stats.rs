use super::Source;

/// Leaf-instruction counters of one flush.
///
/// Mode scopes are not counted themselves; their children count toward the
/// partition the scope executes in.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameStats {
    pub total: u32,
    pub entity: u32,
    pub ui: u32,
}

impl FrameStats {
    #[inline]
    pub(super) fn record(&mut self, phase: Source) {
        self.total += 1;
        match phase {
            Source::Entity => self.entity += 1,
            Source::Ui => self.ui += 1,
        }
    }
}
