//! sequence-viewer: headless engine for stacked light-curve plots.
//!
//! The crate keeps plot ranges, zoom history, selections and per-point
//! validity for every band of a dataset. Hosts feed pointer and slider
//! events and draw the `render::PlotFrame` snapshots with their own toolkit.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod io;
pub mod render;
pub mod telemetry;

pub use api::{SequenceViewer, ViewportConfig, ViewportController};
pub use error::{ViewerError, ViewerResult};
