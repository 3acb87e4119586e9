//! Fixed-precision labels for axis ticks and range read-outs.

pub const X_AXIS_DECIMALS: usize = 1;
pub const Y_AXIS_DECIMALS: usize = 3;

#[must_use]
pub fn format_with_decimals(value: f32, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

#[must_use]
pub fn format_for_x_axis(value: f32) -> String {
    format_with_decimals(value, X_AXIS_DECIMALS)
}

#[must_use]
pub fn format_for_y_axis(value: f32) -> String {
    format_with_decimals(value, Y_AXIS_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::{format_for_x_axis, format_for_y_axis};

    #[test]
    fn axis_precision_differs_per_axis() {
        assert_eq!(format_for_x_axis(12.34), "12.3");
        assert_eq!(format_for_y_axis(-0.5), "-0.500");
    }
}
