use super::{DrawCmd, FrameStats, Instruction, Layer, SortKey, Source};

/// Per-frame store of deferred draw instructions.
///
/// Owned by the frame driver and lent by `&mut` to every draw callback.
///
/// Performance characteristics:
/// - enqueue is O(1) amortized
/// - top-level storage is reused across frames; no per-frame allocation once warmed
///
/// # Scopes
///
/// `shader_mode` / `scissor_mode` push a fresh child list on an explicit
/// stack; everything enqueued while it is on top becomes that scope's
/// children. The top-level list sits below the stack and is live whenever
/// no scope is open.
#[derive(Debug, Default)]
pub struct RenderQueue {
    root: Vec<Instruction>,
    open: Vec<Vec<Instruction>>,
    next_order: u32,
    pub(super) stats: FrameStats,
}

impl RenderQueue {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level instructions in enqueue order.
    ///
    /// Scope children are only reachable through their scope instruction.
    #[inline]
    pub fn instructions(&self) -> &[Instruction] {
        &self.root
    }

    /// Number of top-level instructions waiting for the next flush.
    #[inline]
    pub fn len(&self) -> usize {
        self.root.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Number of currently open mode scopes.
    #[inline]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Counters recorded by the most recent flush.
    #[inline]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Appends `cmd` to the live list (innermost open scope, else top level).
    ///
    /// # Panics
    /// Panics if `layer.z` is not finite.
    pub(crate) fn push(&mut self, source: Source, layer: Layer, cmd: DrawCmd) {
        assert!(layer.z.is_finite(), "z-layer must be finite, got {}", layer.z);

        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        let instruction = Instruction { key: SortKey::new(layer, order), source, cmd };
        self.live().push(instruction);
    }

    /// Runs `f` with a fresh child list on top of the stack and returns what it enqueued.
    ///
    /// The stack depth is restored even if `f` unwinds.
    pub(super) fn capture<F>(&mut self, f: F) -> Vec<Instruction>
    where
        F: FnOnce(&mut RenderQueue),
    {
        let depth = self.open.len();
        self.open.push(Vec::new());

        let mut guard = ScopeGuard { queue: self, depth };
        f(&mut *guard.queue);

        debug_assert_eq!(guard.queue.open.len(), depth + 1, "scope stack corrupted inside callback");
        let children = guard.queue.open.pop().unwrap_or_default();
        log::trace!("scope at depth {depth} captured {} instructions", children.len());
        children
    }

    /// Takes the top-level list for flushing and resets the enqueue counter.
    ///
    /// # Panics
    /// Panics if a scope is still open.
    pub(super) fn take_root(&mut self) -> Vec<Instruction> {
        assert!(self.open.is_empty(), "flush called inside an open mode scope (depth {})", self.open.len());
        self.next_order = 0;
        std::mem::take(&mut self.root)
    }

    /// Hands the drained buffer back so its capacity is reused next frame.
    pub(super) fn recycle_root(&mut self, mut buffer: Vec<Instruction>) {
        debug_assert!(self.root.is_empty());
        buffer.clear();
        self.root = buffer;
    }

    #[inline]
    fn live(&mut self) -> &mut Vec<Instruction> {
        match self.open.last_mut() {
            Some(list) => list,
            None => &mut self.root,
        }
    }
}

struct ScopeGuard<'a> {
    queue: &'a mut RenderQueue,
    depth: usize,
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.queue.open.truncate(self.depth);
    }
}
