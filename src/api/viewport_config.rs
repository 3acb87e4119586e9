use serde::{Deserialize, Serialize};

use crate::core::{PlotInsets, Viewport};
use crate::error::{ViewerError, ViewerResult};

/// Rendering toggles exposed per plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotStyle {
    #[serde(default = "default_true")]
    pub show_base_line: bool,
    #[serde(default = "default_true")]
    pub show_tick_lines: bool,
    #[serde(default)]
    pub show_error_bars: bool,
    #[serde(default = "default_true")]
    pub show_invalid_points: bool,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            show_base_line: true,
            show_tick_lines: true,
            show_error_bars: false,
            show_invalid_points: true,
        }
    }
}

/// Bootstrap configuration shared by every viewport of a viewer.
///
/// Serializable so hosts can persist their plot setup as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub insets: PlotInsets,
    /// Padding added on each side of the natural X range, as a share of its span.
    #[serde(default = "default_x_margin_ratio")]
    pub x_margin_ratio: f32,
    /// Padding added on each side of every derived Y range.
    #[serde(default = "default_y_margin_ratio")]
    pub y_margin_ratio: f32,
    #[serde(default = "default_slider_min")]
    pub slider_min: i32,
    #[serde(default = "default_slider_max")]
    pub slider_max: i32,
    #[serde(default = "default_x_tick_count")]
    pub x_tick_count: u32,
    #[serde(default = "default_y_tick_count")]
    pub y_tick_count: u32,
    #[serde(default)]
    pub style: PlotStyle,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            insets: PlotInsets::default(),
            x_margin_ratio: default_x_margin_ratio(),
            y_margin_ratio: default_y_margin_ratio(),
            slider_min: default_slider_min(),
            slider_max: default_slider_max(),
            x_tick_count: default_x_tick_count(),
            y_tick_count: default_y_tick_count(),
            style: PlotStyle::default(),
        }
    }
}

impl ViewportConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_insets(mut self, insets: PlotInsets) -> Self {
        self.insets = insets;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, x_margin_ratio: f32, y_margin_ratio: f32) -> Self {
        self.x_margin_ratio = x_margin_ratio;
        self.y_margin_ratio = y_margin_ratio;
        self
    }

    #[must_use]
    pub fn with_slider_scale(mut self, slider_min: i32, slider_max: i32) -> Self {
        self.slider_min = slider_min;
        self.slider_max = slider_max;
        self
    }

    #[must_use]
    pub fn with_tick_counts(mut self, x_tick_count: u32, y_tick_count: u32) -> Self {
        self.x_tick_count = x_tick_count;
        self.y_tick_count = y_tick_count;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: PlotStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(self) -> ViewerResult<Self> {
        if self.insets.plot_width(self.viewport) == 0 || self.insets.plot_height(self.viewport) == 0
        {
            return Err(ViewerError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for (name, ratio) in [
            ("x margin ratio", self.x_margin_ratio),
            ("y margin ratio", self.y_margin_ratio),
        ] {
            if !ratio.is_finite() || ratio < 0.0 {
                return Err(ViewerError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if self.slider_max <= self.slider_min {
            return Err(ViewerError::InvalidData(
                "slider max must be greater than slider min".to_owned(),
            ));
        }
        if self.x_tick_count == 0 || self.y_tick_count == 0 {
            return Err(ViewerError::InvalidData(
                "tick counts must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(self) -> ViewerResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ViewerError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ViewerResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ViewerError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()
    }
}

fn default_true() -> bool {
    true
}

fn default_x_margin_ratio() -> f32 {
    0.01
}

fn default_y_margin_ratio() -> f32 {
    0.04
}

fn default_slider_min() -> i32 {
    0
}

fn default_slider_max() -> i32 {
    100
}

fn default_x_tick_count() -> u32 {
    15
}

fn default_y_tick_count() -> u32 {
    10
}
