use serde::{Deserialize, Serialize};

use crate::error::{ViewerError, ViewerResult};

/// Part of a range slider the user grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SliderSide {
    None,
    /// Left handle of a horizontal slider, top handle of a vertical one.
    LowHandle,
    /// Right handle of a horizontal slider, bottom handle of a vertical one.
    HighHandle,
    /// The band between both handles.
    Thumb,
}

/// Two-handle slider state on an abstract integer scale.
///
/// Always keeps `min <= low <= high <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSlider {
    min: i32,
    max: i32,
    low: i32,
    high: i32,
}

impl RangeSlider {
    pub fn new(min: i32, max: i32) -> ViewerResult<Self> {
        if max <= min {
            return Err(ViewerError::InvalidData(format!(
                "slider scale must satisfy max > min, got [{min}, {max}]"
            )));
        }
        Ok(Self {
            min,
            max,
            low: min,
            high: max,
        })
    }

    #[must_use]
    pub fn min(self) -> i32 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> i32 {
        self.max
    }

    #[must_use]
    pub fn low_value(self) -> i32 {
        self.low
    }

    #[must_use]
    pub fn high_value(self) -> i32 {
        self.high
    }

    #[must_use]
    pub fn span(self) -> i32 {
        self.max - self.min
    }

    #[must_use]
    pub fn is_fully_stretched(self) -> bool {
        self.low == self.min && self.high == self.max
    }

    pub fn reset(&mut self) {
        self.low = self.min;
        self.high = self.max;
    }

    /// Moves the low handle; it cannot pass the high handle.
    pub fn set_low_value(&mut self, value: i32) {
        self.low = value.clamp(self.min, self.high);
    }

    /// Moves the high handle; it cannot pass the low handle.
    pub fn set_high_value(&mut self, value: i32) {
        self.high = value.clamp(self.low, self.max);
    }

    /// Moves both handles at once, so a window can jump past its old position.
    pub fn set_values(&mut self, low: i32, high: i32) {
        let low = low.clamp(self.min, self.max);
        self.low = low;
        self.high = high.clamp(low, self.max);
    }

    /// Flips top-down positions into bottom-up ones (and back).
    #[must_use]
    pub fn mirror(self, value: i32) -> i32 {
        self.min + self.max - value
    }
}
