use crate::api::{PlotStyle, SelectionMarker, ViewportController};
use crate::core::{PlotInsets, PlotRange, PlotTransform, Viewport};
use crate::error::{ViewerError, ViewerResult};
use crate::io::{X_AXIS_DECIMALS, Y_AXIS_DECIMALS, format_for_x_axis, format_for_y_axis};
use crate::render::{AxisTick, axis_ticks, zero_line_offset};

/// Point handed to a backend, in data units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePoint {
    pub x: f32,
    pub y: f32,
    /// Present only when error bars are shown.
    pub error: Option<f32>,
    pub valid: bool,
}

/// Backend-agnostic scene for one plot draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotFrame {
    pub viewport: Viewport,
    pub insets: PlotInsets,
    pub visible_range: PlotRange,
    pub transform: PlotTransform,
    pub style: PlotStyle,
    pub band: Option<String>,
    pub points: Vec<FramePoint>,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
    /// Y offset of the tick labelled zero.
    pub zero_line: Option<i32>,
    pub selection: Option<SelectionMarker>,
    pub range_label: Option<String>,
}

impl PlotFrame {
    pub fn from_controller(controller: &ViewportController) -> ViewerResult<Self> {
        let config = controller.config();
        let style = config.style;
        let Some(transform) = controller.transform() else {
            return Err(ViewerError::InvalidData(format!(
                "no drawable transform for range {}",
                controller.effective_range()
            )));
        };
        let range = transform.range();
        let (x_scale, y_scale) = transform.scale();

        let x_ticks = axis_ticks(
            range.min.x,
            range.x_span(),
            x_scale,
            config.x_tick_count,
            X_AXIS_DECIMALS,
            false,
        );
        let y_ticks = axis_ticks(
            range.min.y,
            range.y_span(),
            y_scale,
            config.y_tick_count,
            Y_AXIS_DECIMALS,
            true,
        );
        let zero_line = zero_line_offset(&y_ticks);

        let series = controller.series();
        let points = series.map_or_else(Vec::new, |series| {
            (0..series.len())
                .filter_map(|index| {
                    let valid = series.is_valid_at(index);
                    let y = series.y().get(index);
                    if !valid && !(style.show_invalid_points && y.is_finite()) {
                        return None;
                    }
                    Some(FramePoint {
                        x: series.x().get(index),
                        y,
                        error: style
                            .show_error_bars
                            .then(|| series.y_error().get(index))
                            .filter(|error| error.is_finite()),
                        valid,
                    })
                })
                .collect()
        });
        let range_label = series.map(|_| {
            format!(
                "Zoom Range x:[{}, {}], y:[{}, {}]",
                format_for_x_axis(range.min.x),
                format_for_x_axis(range.max.x),
                format_for_y_axis(range.min.y),
                format_for_y_axis(range.max.y)
            )
        });

        Ok(Self {
            viewport: controller.viewport(),
            insets: config.insets,
            visible_range: range,
            transform,
            style,
            band: series.map(|series| series.id().to_owned()),
            points,
            x_ticks,
            y_ticks,
            zero_line,
            selection: controller.selection_marker(),
            range_label,
        })
    }

    pub fn validate(&self) -> ViewerResult<()> {
        if !self.viewport.is_valid() {
            return Err(ViewerError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.visible_range.validate()?;

        for point in &self.points {
            if !point.x.is_finite() || !point.y.is_finite() {
                return Err(ViewerError::InvalidData(format!(
                    "frame point ({}, {}) is not finite",
                    point.x, point.y
                )));
            }
        }
        if let Some(marker) = self.selection {
            if !marker.start_x.is_finite() || !marker.end_x.is_finite() || !marker.y.is_finite() {
                return Err(ViewerError::InvalidData(
                    "selection marker must be finite".to_owned(),
                ));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn valid_point_count(&self) -> usize {
        self.points.iter().filter(|point| point.valid).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
