use crate::error::ViewerResult;
use crate::render::{PlotFrame, Renderer};

/// Renderer for tests and headless use.
///
/// Frames are still validated so bad geometry surfaces without a backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_point_count: usize,
    pub last_tick_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &PlotFrame) -> ViewerResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_point_count = frame.points.len();
        self.last_tick_count = frame.x_ticks.len() + frame.y_ticks.len();
        Ok(())
    }
}
