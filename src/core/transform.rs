use crate::core::{PlotInsets, PlotPoint, PlotRange, Viewport};
use crate::error::{ViewerError, ViewerResult};

/// Affine mapping between data space and widget pixels.
///
/// Data X grows to the right from the plot area's left inset; data Y grows
/// upwards from the bottom inset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotTransform {
    origin_x: f64,
    origin_y: f64,
    x_scale: f64,
    y_scale: f64,
    range: PlotRange,
}

impl PlotTransform {
    pub fn new(viewport: Viewport, insets: PlotInsets, range: PlotRange) -> ViewerResult<Self> {
        let plot_width = insets.plot_width(viewport);
        let plot_height = insets.plot_height(viewport);
        if !viewport.is_valid() || plot_width == 0 || plot_height == 0 {
            return Err(ViewerError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let x_span = f64::from(range.x_span());
        let y_span = f64::from(range.y_span());
        if !x_span.is_finite() || !y_span.is_finite() || x_span == 0.0 || y_span == 0.0 {
            return Err(ViewerError::InvalidData(format!(
                "cannot invert transform for degenerate range {range}"
            )));
        }

        Ok(Self {
            origin_x: f64::from(insets.left),
            origin_y: f64::from(viewport.height - insets.bottom),
            x_scale: f64::from(plot_width) / x_span,
            y_scale: f64::from(plot_height) / y_span,
            range,
        })
    }

    #[must_use]
    pub fn range(self) -> PlotRange {
        self.range
    }

    /// Pixels per data unit on each axis.
    #[must_use]
    pub fn scale(self) -> (f64, f64) {
        (self.x_scale, self.y_scale)
    }

    #[must_use]
    pub fn data_to_screen(self, point: PlotPoint) -> (f64, f64) {
        let x = self.origin_x + (f64::from(point.x) - f64::from(self.range.min.x)) * self.x_scale;
        let y = self.origin_y - (f64::from(point.y) - f64::from(self.range.min.y)) * self.y_scale;
        (x, y)
    }

    #[must_use]
    pub fn screen_to_data(self, x: f64, y: f64) -> PlotPoint {
        let data_x = f64::from(self.range.min.x) + (x - self.origin_x) / self.x_scale;
        let data_y = f64::from(self.range.min.y) + (self.origin_y - y) / self.y_scale;
        PlotPoint::new(data_x as f32, data_y as f32)
    }
}
