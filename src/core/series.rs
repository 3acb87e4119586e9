use std::fmt;

use tracing::trace;

use crate::core::PointBuffer;
use crate::error::{ViewerError, ViewerResult};

/// Tolerance used when comparing X bounds of two series.
const X_BOUNDS_EPSILON: f32 = 0.0001;

/// One named band: X column plus Y values and symmetric Y errors.
///
/// Validity lives on the Y value buffer; the error buffer only carries
/// magnitudes.
#[derive(Debug, Clone)]
pub struct Series {
    id: String,
    x: PointBuffer,
    y: PointBuffer,
    y_error: PointBuffer,
    min_x: f32,
    max_x: f32,
    min_y: f32,
    max_y: f32,
}

impl Series {
    /// Builds a band from finalized X and Y value buffers.
    pub fn new(
        id: impl Into<String>,
        x: PointBuffer,
        (y, y_error): (PointBuffer, PointBuffer),
    ) -> ViewerResult<Self> {
        let id = id.into();
        if x.len() != y.len() || y.len() != y_error.len() {
            return Err(ViewerError::InvalidData(format!(
                "band '{id}' has mismatched lengths: x={}, y={}, error={}",
                x.len(),
                y.len(),
                y_error.len()
            )));
        }
        if !x.is_finalized() || !y.is_finalized() {
            return Err(ViewerError::InvalidData(format!(
                "band '{id}' must be built from finalized buffers"
            )));
        }

        Ok(Self {
            min_x: x.min(),
            max_x: x.max(),
            min_y: y.min(),
            max_y: y.max(),
            id,
            x,
            y,
            y_error,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.y.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    #[must_use]
    pub fn x(&self) -> &PointBuffer {
        &self.x
    }

    #[must_use]
    pub fn y(&self) -> &PointBuffer {
        &self.y
    }

    #[must_use]
    pub fn y_error(&self) -> &PointBuffer {
        &self.y_error
    }

    #[must_use]
    pub fn min_x(&self) -> f32 {
        self.min_x
    }

    #[must_use]
    pub fn max_x(&self) -> f32 {
        self.max_x
    }

    #[must_use]
    pub fn min_y(&self) -> f32 {
        self.min_y
    }

    #[must_use]
    pub fn max_y(&self) -> f32 {
        self.max_y
    }

    #[must_use]
    pub fn is_valid_at(&self, index: usize) -> bool {
        self.y.is_valid(index)
    }

    #[must_use]
    pub fn valid_count(&self) -> usize {
        self.y.valid_count()
    }

    fn indices_in_x_window(&self, start_x: f32, end_x: f32) -> impl Iterator<Item = usize> + '_ {
        self.x
            .iter()
            .enumerate()
            .filter(move |&(_, x)| x >= start_x && x <= end_x)
            .map(|(index, _)| index)
    }

    /// Sets validity of every point whose X lies in `[start_x, end_x]`.
    ///
    /// Returns how many points were touched.
    pub fn set_valid_in_range(&mut self, start_x: f32, end_x: f32, valid: bool) -> usize {
        let indices: Vec<usize> = self.indices_in_x_window(start_x, end_x).collect();
        for &index in &indices {
            self.y.set_valid(index, valid);
        }
        trace!(band = %self.id, start_x, end_x, valid, touched = indices.len(), "set validity in range");
        indices.len()
    }

    /// Validates points inside `[start_x, end_x]` and invalidates the rest.
    pub fn set_valid_outside_range(&mut self, start_x: f32, end_x: f32) {
        for index in 0..self.x.len() {
            let x = self.x.get(index);
            self.y.set_valid(index, x >= start_x && x <= end_x);
        }
        trace!(band = %self.id, start_x, end_x, "keep only points inside range");
    }

    pub fn set_all_valid(&mut self, valid: bool) {
        self.y.set_all_valid(valid);
    }

    /// Y bounds among points with X in `[min_x, max_x]`.
    ///
    /// Falls back to the band's global bounds when the window is empty or
    /// inverted. NaN placeholders never contribute.
    #[must_use]
    pub fn local_min_max_y(&self, min_x: f32, max_x: f32) -> (f32, f32) {
        if max_x <= min_x {
            return (self.min_y, self.max_y);
        }

        let local = self
            .indices_in_x_window(min_x, max_x)
            .map(|index| self.y.get(index))
            .filter(|y| !y.is_nan())
            .fold(None, |bounds: Option<(f32, f32)>, y| {
                Some(bounds.map_or((y, y), |(min, max)| (min.min(y), max.max(y))))
            });

        local.unwrap_or((self.min_y, self.max_y))
    }
}

impl PartialEq for Series {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.y == other.y
            && self.min_y == other.min_y
            && self.max_y == other.max_y
            && (self.min_x - other.min_x).abs() < X_BOUNDS_EPSILON
            && (self.max_x - other.max_x).abs() < X_BOUNDS_EPSILON
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "point count: {}, X <{}, {}>, Y <{}, {}>, \"{}\">",
            self.len(),
            self.min_x,
            self.max_x,
            self.min_y,
            self.max_y,
            self.id
        )
    }
}
