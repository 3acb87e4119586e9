mod axis;
mod frame;
mod null_renderer;

pub use axis::{AxisTick, axis_ticks, tick_count, tick_start, zero_line_offset};
pub use frame::{FramePoint, PlotFrame};
pub use null_renderer::NullRenderer;

use crate::error::ViewerResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive a fully materialized `PlotFrame`; drawing code never
/// touches the controller.
pub trait Renderer {
    fn render(&mut self, frame: &PlotFrame) -> ViewerResult<()>;
}
