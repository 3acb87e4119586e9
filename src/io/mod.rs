//! Data files: loading, saving and value formatting.

mod dataset;
mod format;
mod parser;
mod persister;

pub use dataset::Dataset;
pub use format::{
    X_AXIS_DECIMALS, Y_AXIS_DECIMALS, format_for_x_axis, format_for_y_axis, format_with_decimals,
};
pub use parser::{NO_VALUE, parse_file, parse_reader, parse_str};
pub use persister::{persist, write_bands, write_dataset};
