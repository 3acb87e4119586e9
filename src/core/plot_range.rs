use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::PlotPoint;
use crate::error::{ViewerError, ViewerResult};

const UNDEFINED_COORDINATE: f32 = -1.0;

/// Data-space rectangle mapped onto the plotting area.
///
/// Zoom history entries are value copies of the live range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotRange {
    pub min: PlotPoint,
    pub max: PlotPoint,
}

impl PlotRange {
    /// Sentinel for "no data loaded yet": every coordinate is `-1`.
    pub const UNDEFINED: Self = Self {
        min: PlotPoint {
            x: UNDEFINED_COORDINATE,
            y: UNDEFINED_COORDINATE,
        },
        max: PlotPoint {
            x: UNDEFINED_COORDINATE,
            y: UNDEFINED_COORDINATE,
        },
    };

    #[must_use]
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: PlotPoint::new(min_x, min_y),
            max: PlotPoint::new(max_x, max_y),
        }
    }

    /// Builds a range after checking both axes are finite and non-empty.
    pub fn checked(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> ViewerResult<Self> {
        let range = Self::new(min_x, min_y, max_x, max_y);
        range.validate()?;
        Ok(range)
    }

    pub fn validate(self) -> ViewerResult<()> {
        let finite = [self.min.x, self.min.y, self.max.x, self.max.y]
            .iter()
            .all(|value| value.is_finite());
        if !finite {
            return Err(ViewerError::InvalidData(
                "plot range bounds must be finite".to_owned(),
            ));
        }
        if self.max.x <= self.min.x || self.max.y <= self.min.y {
            return Err(ViewerError::InvalidData(format!(
                "plot range must have max > min on both axes: {self}"
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn is_undefined(self) -> bool {
        self == Self::UNDEFINED
    }

    #[must_use]
    pub fn x_span(self) -> f32 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn y_span(self) -> f32 {
        self.max.y - self.min.y
    }

    #[must_use]
    pub fn with_x(mut self, min_x: f32, max_x: f32) -> Self {
        self.min.x = min_x;
        self.max.x = max_x;
        self
    }

    #[must_use]
    pub fn with_y(mut self, min_y: f32, max_y: f32) -> Self {
        self.min.y = min_y;
        self.max.y = max_y;
        self
    }

    /// Clamps a point into the rectangle, each axis independently.
    #[must_use]
    pub fn clamp(self, point: PlotPoint) -> PlotPoint {
        PlotPoint::new(
            point.x.max(self.min.x).min(self.max.x),
            point.y.max(self.min.y).min(self.max.y),
        )
    }
}

impl Default for PlotRange {
    fn default() -> Self {
        Self::UNDEFINED
    }
}

impl fmt::Display for PlotRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "min: ({}, {}), max: ({}, {})",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}

/// Absolute padding added on each side of `[min, max]`.
#[must_use]
pub fn visibility_margin(min: f32, max: f32, ratio: f32) -> f32 {
    (max - min).abs() * ratio
}
