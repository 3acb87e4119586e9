mod events;
mod range_slider;
mod sequence_viewer;
mod viewport_config;
mod viewport_controller;

pub use events::{ViewportEvent, ViewportListener, ViewportSnapshot};
pub use range_slider::{RangeSlider, SliderSide};
pub use sequence_viewer::SequenceViewer;
pub use viewport_config::{PlotStyle, ViewportConfig};
pub use viewport_controller::{SelectionMarker, ViewportController};
