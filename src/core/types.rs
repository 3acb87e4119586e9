use serde::{Deserialize, Serialize};

/// Pixel size of the plotting widget, insets included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 400)
    }
}

/// Space reserved around the plotting area for ticks and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotInsets {
    pub top: u32,
    pub left: u32,
    pub bottom: u32,
    pub right: u32,
}

impl Default for PlotInsets {
    fn default() -> Self {
        Self {
            top: 10,
            left: 80,
            bottom: 50,
            right: 10,
        }
    }
}

impl PlotInsets {
    /// Width of the plotting area, saturating at zero.
    #[must_use]
    pub fn plot_width(self, viewport: Viewport) -> u32 {
        viewport.width.saturating_sub(self.left + self.right)
    }

    /// Height of the plotting area, saturating at zero.
    #[must_use]
    pub fn plot_height(self, viewport: Viewport) -> u32 {
        viewport.height.saturating_sub(self.top + self.bottom)
    }

    /// Whether a widget pixel lies inside the plotting area (edges included).
    #[must_use]
    pub fn contains(self, viewport: Viewport, x: f64, y: f64) -> bool {
        let left = f64::from(self.left);
        let top = f64::from(self.top);
        x >= left
            && x <= left + f64::from(self.plot_width(viewport))
            && y >= top
            && y <= top + f64::from(self.plot_height(viewport))
    }
}

/// A point in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: f32,
    pub y: f32,
}

impl PlotPoint {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
