use serde::{Deserialize, Serialize};

use crate::core::{PlotPoint, PlotRange};
use crate::interaction::InteractionMode;

/// Read-only controller state handed to listeners with every event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSnapshot {
    pub visible_range: PlotRange,
    pub zoom_depth: usize,
    pub mode: InteractionMode,
    pub points_len: usize,
    pub valid_points: usize,
}

/// Notifications a render adapter uses to schedule redraws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ViewportEvent {
    SeriesLoaded { points_len: usize },
    VisibleRangeChanged { range: PlotRange },
    SelectionChanged { start: PlotPoint, end: PlotPoint },
    ValidityChanged { start_x: f32, end_x: f32 },
    ZoomedIn { depth: usize },
    ZoomedOut { depth: usize },
}

/// Observer hook for hosts.
///
/// Listeners see state but cannot mutate the controller.
pub trait ViewportListener {
    fn on_event(&mut self, event: ViewportEvent, snapshot: ViewportSnapshot);
}
