use serde::{Deserialize, Serialize};

use crate::core::PlotPoint;

/// What a completed drag does to the plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    /// Drag zooms into the X window; a click steps back out.
    #[default]
    Zoom,
    /// Drag marks points in the X window valid.
    ValidatePoints,
    /// Drag marks points in the X window invalid.
    InvalidatePoints,
    /// Drag keeps the X window valid and invalidates everything else.
    InvalidatePointsOutsideRectangle,
}

impl InteractionMode {
    pub const ALL: [Self; 4] = [
        Self::Zoom,
        Self::ValidatePoints,
        Self::InvalidatePoints,
        Self::InvalidatePointsOutsideRectangle,
    ];

    /// Short toolbar caption.
    #[must_use]
    pub fn caption(self) -> &'static str {
        match self {
            Self::Zoom => "Zoom",
            Self::ValidatePoints => "Valid",
            Self::InvalidatePoints => "Invalid",
            Self::InvalidatePointsOutsideRectangle => "Invalid Out",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// Drag-selection sub-state of a viewport.
///
/// Start and end are data coordinates. The selection is empty whenever both
/// ends share the same X, which is also the state after every release.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelectionState {
    start: PlotPoint,
    end: PlotPoint,
    dragging: bool,
    from_sibling: bool,
}

impl SelectionState {
    #[must_use]
    pub fn is_dragging(self) -> bool {
        self.dragging
    }

    #[must_use]
    pub fn start(self) -> PlotPoint {
        self.start
    }

    #[must_use]
    pub fn end(self) -> PlotPoint {
        self.end
    }

    /// Whether the gesture was forwarded from another plot of the group.
    #[must_use]
    pub fn from_sibling(self) -> bool {
        self.from_sibling
    }

    #[must_use]
    pub fn has_selection(self) -> bool {
        self.start.x != self.end.x
    }

    /// Ordered X interval covered by the selection.
    #[must_use]
    pub fn x_interval(self) -> (f32, f32) {
        (self.start.x.min(self.end.x), self.start.x.max(self.end.x))
    }

    pub fn begin(&mut self, point: PlotPoint, from_sibling: bool) {
        self.start = point;
        self.end = point;
        self.dragging = true;
        self.from_sibling = from_sibling;
    }

    pub fn extend(&mut self, point: PlotPoint, from_sibling: bool) {
        self.end = point;
        self.from_sibling = from_sibling;
    }

    /// Ends the drag and collapses the selection onto its start point.
    pub fn finish(&mut self) {
        self.end = self.start;
        self.dragging = false;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::SelectionState;
    use crate::core::PlotPoint;

    #[test]
    fn vertical_only_drag_is_not_a_selection() {
        let mut selection = SelectionState::default();
        selection.begin(PlotPoint::new(2.0, 1.0), false);
        selection.extend(PlotPoint::new(2.0, 9.0), false);
        assert!(selection.is_dragging());
        assert!(!selection.has_selection());
    }

    #[test]
    fn interval_is_ordered_regardless_of_drag_direction() {
        let mut selection = SelectionState::default();
        selection.begin(PlotPoint::new(8.0, 0.0), false);
        selection.extend(PlotPoint::new(3.0, 0.0), false);
        assert_eq!(selection.x_interval(), (3.0, 8.0));
        selection.finish();
        assert!(!selection.has_selection());
        assert!(!selection.is_dragging());
    }
}
