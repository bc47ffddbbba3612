mod clip_area;
mod label;
mod panel;
mod progress;

pub use clip_area::ClipArea;
pub use label::Label;
pub use panel::Panel;
pub use progress::ProgressBar;

#[cfg(test)]
pub(crate) mod testing {
    use ember_engine::render::{Call, Camera2D, RecordingBackend, RenderQueue};

    /// Flushes `queue` and returns the non-camera calls.
    pub fn flush_calls(queue: &mut RenderQueue) -> Vec<Call> {
        let mut backend = RecordingBackend::new();
        queue.flush(&Camera2D::default(), &mut backend);
        backend
            .take()
            .into_iter()
            .map(|c| c.call)
            .filter(|c| !matches!(c, Call::BeginCamera(_) | Call::EndCamera))
            .collect()
    }
}
