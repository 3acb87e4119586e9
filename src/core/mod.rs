pub mod plot_range;
pub mod point_buffer;
pub mod series;
pub mod transform;
pub mod types;

pub use plot_range::{PlotRange, visibility_margin};
pub use point_buffer::PointBuffer;
pub use series::Series;
pub use transform::PlotTransform;
pub use types::{PlotInsets, PlotPoint, Viewport};
