use serde::{Deserialize, Serialize};

use crate::io::format_with_decimals;

/// One labelled tick, positioned relative to the plot origin.
///
/// X offsets grow to the right; Y offsets are negative since screen Y grows
/// downwards from the bottom-left corner of the plotting area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub offset_px: i32,
    pub value: f32,
    pub label: String,
}

/// Distance from `min` to the first multiple of `interval` at or above it.
#[must_use]
pub fn tick_start(min: f32, interval: f32) -> f32 {
    ((f64::from(min) / f64::from(interval)).ceil() * f64::from(interval) - f64::from(min)) as f32
}

#[must_use]
pub fn tick_count(span: f32, start: f32, interval: f32) -> usize {
    let count = ((span - start).abs() / interval + 1.0).floor();
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

/// Ticks at round multiples of `span / requested` over `[min, min + span]`.
#[must_use]
pub fn axis_ticks(
    min: f32,
    span: f32,
    pixels_per_unit: f64,
    requested: u32,
    decimals: usize,
    invert: bool,
) -> Vec<AxisTick> {
    if requested == 0 || !span.is_finite() || span <= 0.0 || !pixels_per_unit.is_finite() {
        return Vec::new();
    }
    let interval = span / requested as f32;
    let start = tick_start(min, interval);
    let sign = if invert { -1.0 } else { 1.0 };

    (0..tick_count(span, start, interval))
        .map(|i| {
            let offset = start + i as f32 * interval;
            let value = offset + min;
            AxisTick {
                offset_px: (sign * f64::from(offset) * pixels_per_unit) as i32,
                value,
                label: format_with_decimals(value, decimals),
            }
        })
        .collect()
}

/// Offset of the tick whose label reads as zero (`-0.000` included).
#[must_use]
pub fn zero_line_offset(ticks: &[AxisTick]) -> Option<i32> {
    ticks
        .iter()
        .find(|tick| tick.label.parse::<f32>().is_ok_and(|value| value == 0.0))
        .map(|tick| tick.offset_px)
}

#[cfg(test)]
mod tests {
    use super::{axis_ticks, tick_count, tick_start, zero_line_offset};

    #[test]
    fn start_snaps_to_next_interval_multiple() {
        assert!((tick_start(0.3, 0.5) - 0.2).abs() < 1e-6);
        assert_eq!(tick_start(1.0, 0.5), 0.0);
        assert_eq!(tick_count(10.0, 0.0, 1.0), 11);
    }

    #[test]
    fn y_ticks_are_inverted_and_find_zero() {
        let ticks = axis_ticks(-1.0, 2.0, 100.0, 4, 3, true);
        assert_eq!(ticks.len(), 5);
        assert_eq!(ticks[0].offset_px, 0);
        assert_eq!(ticks[0].label, "-1.000");
        assert_eq!(ticks[4].offset_px, -200);
        assert_eq!(zero_line_offset(&ticks), Some(-100));
    }

    #[test]
    fn degenerate_span_has_no_ticks() {
        assert!(axis_ticks(0.0, 0.0, 1.0, 10, 1, false).is_empty());
    }
}
