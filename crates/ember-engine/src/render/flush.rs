use super::{Backend, Camera2D, DrawCmd, FrameStats, Instruction, RenderQueue, Source};

impl RenderQueue {
    /// Executes every queued instruction into `backend` and empties the queue.
    ///
    /// Order of execution:
    /// 1) Entity partition, sorted by `SortKey`, inside `begin_camera` / `end_camera`
    /// 2) UI partition, sorted by `SortKey`, in screen space
    ///
    /// Mode scopes execute as `begin`, children in enqueue order, `end`.
    /// Counters are reset first and describe this flush only.
    ///
    /// # Panics
    /// Panics if called while a mode scope is open.
    pub fn flush<B>(&mut self, camera: &Camera2D, backend: &mut B) -> FrameStats
    where
        B: Backend + ?Sized,
    {
        self.stats = FrameStats::default();

        let mut root = self.take_root();
        let mut ui: Vec<Instruction> = Vec::new();
        let mut entity: Vec<Instruction> = Vec::with_capacity(root.len());
        for instruction in root.drain(..) {
            match instruction.source {
                Source::Entity => entity.push(instruction),
                Source::Ui => ui.push(instruction),
            }
        }

        // Stable sorts; `order` in the key already makes ties impossible.
        entity.sort_by(|a, b| a.key.cmp(&b.key));
        ui.sort_by(|a, b| a.key.cmp(&b.key));

        let mut stats = FrameStats::default();

        backend.begin_camera(camera);
        for instruction in &entity {
            execute(instruction, Source::Entity, backend, &mut stats);
        }
        backend.end_camera();

        for instruction in &ui {
            execute(instruction, Source::Ui, backend, &mut stats);
        }

        log::debug!(
            "flushed {} draws ({} entity, {} ui)",
            stats.total,
            stats.entity,
            stats.ui
        );

        self.stats = stats;
        self.recycle_root(root);
        stats
    }
}

fn execute<B>(instruction: &Instruction, phase: Source, backend: &mut B, stats: &mut FrameStats)
where
    B: Backend + ?Sized,
{
    match &instruction.cmd {
        DrawCmd::Rectangle(cmd) => backend.draw_rectangle(cmd),
        DrawCmd::RectangleLines(cmd) => backend.draw_rectangle_lines(cmd),
        DrawCmd::CircleLines(cmd) => backend.draw_circle_lines(cmd),
        DrawCmd::Texture(cmd) => backend.draw_texture(cmd),
        DrawCmd::Text(cmd) => backend.draw_text(cmd),
        DrawCmd::ShaderMode(scope) => {
            backend.begin_shader_mode(scope.shader);
            for child in &scope.children {
                execute(child, phase, backend, stats);
            }
            backend.end_shader_mode();
            return;
        }
        DrawCmd::ScissorMode(scope) => {
            backend.begin_scissor_mode(scope.rect);
            for child in &scope.children {
                execute(child, phase, backend, stats);
            }
            backend.end_scissor_mode();
            return;
        }
    }
    stats.record(phase);
}
