use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::core::{PlotPoint, PlotRange, PlotTransform, Series, Viewport, visibility_margin};
use crate::error::{ViewerError, ViewerResult};
use crate::interaction::{InteractionMode, PointerButton, SelectionState};

use super::{
    RangeSlider, SliderSide, ViewportConfig, ViewportEvent, ViewportListener, ViewportSnapshot,
};

/// Half height, in pixels, of the end ticks drawn on the selection marker.
const SELECTION_MARKER_HALF_HEIGHT_PX: f64 = 2.0;

/// Selection line the render adapter draws while a drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionMarker {
    pub start_x: f32,
    pub end_x: f32,
    pub y: f32,
    /// Half height of the end ticks in data units.
    pub tick_half_height: f32,
}

/// Plot-range, zoom-history and selection engine for one band.
///
/// Hosts feed widget-space pointer events and slider moves; the controller
/// keeps the visible data rectangle, the zoom history and the validity
/// flags of its series up to date. It never draws.
pub struct ViewportController {
    config: ViewportConfig,
    viewport: Viewport,
    series: Option<Series>,
    visible_range: PlotRange,
    zoom_history: SmallVec<[PlotRange; 8]>,
    selection: SelectionState,
    pressed_button: Option<PointerButton>,
    mode: InteractionMode,
    transform: Option<PlotTransform>,
    horizontal_slider: Option<RangeSlider>,
    vertical_slider: Option<RangeSlider>,
    visible: bool,
    listeners: Vec<Box<dyn ViewportListener>>,
}

impl ViewportController {
    pub fn new(config: ViewportConfig) -> ViewerResult<Self> {
        let config = config.validate()?;
        let mut controller = Self {
            viewport: config.viewport,
            config,
            series: None,
            visible_range: PlotRange::UNDEFINED,
            zoom_history: SmallVec::new(),
            selection: SelectionState::default(),
            pressed_button: None,
            mode: InteractionMode::default(),
            transform: None,
            horizontal_slider: None,
            vertical_slider: None,
            visible: true,
            listeners: Vec::new(),
        };
        controller.refresh_transform();
        Ok(controller)
    }

    pub fn with_series(config: ViewportConfig, series: Series) -> ViewerResult<Self> {
        let mut controller = Self::new(config)?;
        controller.set_series(series);
        Ok(controller)
    }

    #[must_use]
    pub fn config(&self) -> ViewportConfig {
        self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> ViewerResult<()> {
        let insets = self.config.insets;
        if insets.plot_width(viewport) == 0 || insets.plot_height(viewport) == 0 {
            return Err(ViewerError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        self.refresh_transform();
        Ok(())
    }

    #[must_use]
    pub fn series(&self) -> Option<&Series> {
        self.series.as_ref()
    }

    pub fn series_mut(&mut self) -> Option<&mut Series> {
        self.series.as_mut()
    }

    /// Replaces the band wholesale and shows its natural range.
    pub fn set_series(&mut self, series: Series) {
        debug!(band = series.id(), points = series.len(), "load series");
        let points_len = series.len();
        self.series = Some(series);
        self.zoom_history.clear();
        self.selection.reset();
        self.pressed_button = None;
        if let Some(slider) = self.horizontal_slider.as_mut() {
            slider.reset();
        }
        if let Some(slider) = self.vertical_slider.as_mut() {
            slider.reset();
        }
        self.reset_plot_ranges();
        self.refresh_transform();
        self.emit(ViewportEvent::SeriesLoaded { points_len });
        self.emit_range_changed();
    }

    pub fn add_listener(&mut self, listener: Box<dyn ViewportListener>) {
        self.listeners.push(listener);
    }

    pub fn attach_horizontal_slider(&mut self, slider: RangeSlider) {
        self.horizontal_slider = Some(slider);
        self.sync_horizontal_slider();
    }

    pub fn attach_vertical_slider(&mut self, slider: RangeSlider) {
        self.vertical_slider = Some(slider);
    }

    pub fn detach_sliders(&mut self) {
        self.horizontal_slider = None;
        self.vertical_slider = None;
    }

    #[must_use]
    pub fn horizontal_slider(&self) -> Option<RangeSlider> {
        self.horizontal_slider
    }

    #[must_use]
    pub fn vertical_slider(&self) -> Option<RangeSlider> {
        self.vertical_slider
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Stored visible range; [`PlotRange::UNDEFINED`] until data arrives.
    #[must_use]
    pub fn visible_range(&self) -> PlotRange {
        self.visible_range
    }

    /// Range actually mapped onto the widget.
    ///
    /// Without data this is the plotting area's pixel extent.
    #[must_use]
    pub fn effective_range(&self) -> PlotRange {
        if self.visible_range.is_undefined() {
            let width = self.config.insets.plot_width(self.viewport) as f32;
            let height = self.config.insets.plot_height(self.viewport) as f32;
            PlotRange::new(0.0, 0.0, width, height)
        } else {
            self.visible_range
        }
    }

    #[must_use]
    pub fn zoom_history(&self) -> &[PlotRange] {
        &self.zoom_history
    }

    #[must_use]
    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    /// `None` when the transform is degenerate.
    #[must_use]
    pub fn transform(&self) -> Option<PlotTransform> {
        self.transform
    }

    #[must_use]
    pub fn snapshot(&self) -> ViewportSnapshot {
        ViewportSnapshot {
            visible_range: self.visible_range,
            zoom_depth: self.zoom_history.len(),
            mode: self.mode,
            points_len: self.series.as_ref().map_or(0, Series::len),
            valid_points: self.series.as_ref().map_or(0, Series::valid_count),
        }
    }

    #[must_use]
    pub fn selection_marker(&self) -> Option<SelectionMarker> {
        if !self.selection.has_selection() {
            return None;
        }
        let range = self.effective_range();
        let y = if self.selection.from_sibling() {
            range.min.y + range.y_span() / 2.0
        } else {
            self.selection.end().y
        };
        let tick_half_height = self.transform.map_or(0.0, |transform| {
            (SELECTION_MARKER_HALF_HEIGHT_PX / transform.scale().1) as f32
        });
        Some(SelectionMarker {
            start_x: self.selection.start().x,
            end_x: self.selection.end().x,
            y,
            tick_half_height,
        })
    }

    /// Starts a gesture; returns `false` when the press misses the plot area.
    ///
    /// A missed press disables the whole gesture until the next press.
    pub fn pointer_down(&mut self, button: PointerButton, x: f64, y: f64) -> bool {
        if !self.config.insets.contains(self.viewport, x, y) {
            trace!(x, y, "press outside plot area");
            self.pressed_button = None;
            return false;
        }
        self.press_action(button, x, y, false);
        true
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        if self.pressed_button.is_none() {
            return false;
        }
        self.drag_action(x, y, false);
        true
    }

    /// Completes a gesture and applies the selection for the active mode.
    pub fn pointer_up(&mut self) -> bool {
        if self.pressed_button.is_none() {
            return false;
        }
        self.release_action(false);
        true
    }

    pub(crate) fn press_action(&mut self, button: PointerButton, x: f64, y: f64, from_sibling: bool) {
        self.pressed_button = Some(button);
        if button != PointerButton::Primary {
            return;
        }
        let Some(point) = self.screen_to_data(x, y) else {
            return;
        };
        self.selection.begin(point, from_sibling);
        trace!(x = point.x, y = point.y, from_sibling, "selection started");
        self.emit_selection_changed();
    }

    pub(crate) fn drag_action(&mut self, x: f64, y: f64, from_sibling: bool) {
        if self.pressed_button != Some(PointerButton::Primary) || !self.selection.is_dragging() {
            return;
        }
        let Some(point) = self.screen_to_data(x, y) else {
            return;
        };
        let point = self.effective_range().clamp(point);
        self.selection.extend(point, from_sibling);
        self.emit_selection_changed();
    }

    pub(crate) fn release_action(&mut self, from_sibling: bool) {
        let button = self.pressed_button.take();
        if button != Some(PointerButton::Primary) || !self.selection.is_dragging() {
            return;
        }
        let has_selection = self.selection.has_selection();
        let (start_x, end_x) = self.selection.x_interval();
        trace!(mode = ?self.mode, has_selection, start_x, end_x, from_sibling, "selection released");

        match (self.mode, has_selection) {
            (InteractionMode::Zoom, true) => self.zoom_in(start_x, end_x),
            (InteractionMode::Zoom, false) => self.zoom_out(),
            (InteractionMode::ValidatePoints, true) => self.validate_points(start_x, end_x, true),
            (InteractionMode::InvalidatePoints, true) => {
                self.validate_points(start_x, end_x, false)
            }
            (InteractionMode::InvalidatePointsOutsideRectangle, true) => {
                self.invalidate_points_outside(start_x, end_x)
            }
            _ => {}
        }

        self.selection.finish();
        self.emit_selection_changed();
    }

    fn screen_to_data(&self, x: f64, y: f64) -> Option<PlotPoint> {
        let point = self.transform.map(|transform| transform.screen_to_data(x, y));
        if point.is_none() {
            warn!(x, y, range = %self.effective_range(), "pointer ignored: transform is not invertible");
        }
        point
    }

    /// Pushes the current range and shows `[min_x, max_x]` with a fitted Y range.
    pub fn zoom_in(&mut self, min_x: f32, max_x: f32) {
        self.zoom_history.push(self.visible_range);
        self.visible_range = self.effective_range().with_x(min_x, max_x);
        self.adjust_y_range_to_local_min_max();
        self.sync_horizontal_slider();
        self.refresh_transform();
        debug!(min_x, max_x, depth = self.zoom_history.len(), "zoom in");
        self.emit(ViewportEvent::ZoomedIn {
            depth: self.zoom_history.len(),
        });
        self.emit_range_changed();
    }

    /// Pops the zoom history.
    ///
    /// With an empty history the natural range is restored when a horizontal
    /// slider is attached; otherwise nothing changes.
    pub fn zoom_out(&mut self) {
        if let Some(previous) = self.zoom_history.pop() {
            self.visible_range = previous;
            self.sync_horizontal_slider();
            self.refresh_transform();
            debug!(depth = self.zoom_history.len(), range = %previous, "zoom out");
            self.emit(ViewportEvent::ZoomedOut {
                depth: self.zoom_history.len(),
            });
            self.emit_range_changed();
        } else if self.horizontal_slider.is_some() {
            self.restore_original_ranges();
            self.emit(ViewportEvent::ZoomedOut { depth: 0 });
        } else {
            trace!("zoom out ignored: empty history and no horizontal slider");
        }
    }

    /// Shows the natural range of the series and resets the horizontal slider.
    ///
    /// The zoom history is left untouched.
    pub fn restore_original_ranges(&mut self) {
        self.reset_plot_ranges();
        if let Some(slider) = self.horizontal_slider.as_mut() {
            slider.reset();
        }
        self.refresh_transform();
        self.emit_range_changed();
    }

    /// Sets the visible X window, refits Y and moves the horizontal slider.
    pub fn change_x_range(&mut self, min_x: f32, max_x: f32) -> ViewerResult<()> {
        check_window("x", min_x, max_x)?;
        self.apply_x_range(min_x, max_x);
        self.sync_horizontal_slider();
        Ok(())
    }

    pub fn change_y_range(&mut self, min_y: f32, max_y: f32) -> ViewerResult<()> {
        check_window("y", min_y, max_y)?;
        self.visible_range = self.effective_range().with_y(min_y, max_y);
        self.refresh_transform();
        self.emit_range_changed();
        Ok(())
    }

    /// Explicit range change: the current range goes onto the zoom history.
    pub fn change_xy_ranges(
        &mut self,
        min_x: f32,
        max_x: f32,
        min_y: f32,
        max_y: f32,
    ) -> ViewerResult<()> {
        let range = PlotRange::checked(min_x, min_y, max_x, max_y)?;
        self.zoom_history.push(self.visible_range);
        self.visible_range = range;
        self.sync_horizontal_slider();
        self.refresh_transform();
        debug!(range = %range, depth = self.zoom_history.len(), "explicit range change");
        self.emit_range_changed();
        Ok(())
    }

    fn apply_x_range(&mut self, min_x: f32, max_x: f32) {
        self.visible_range = self.effective_range().with_x(min_x, max_x);
        self.adjust_y_range_to_local_min_max();
        self.refresh_transform();
        self.emit_range_changed();
    }

    /// Maps a horizontal slider window onto the series X bounds.
    pub fn transform_x_range(&mut self, low: i32, high: i32) -> ViewerResult<()> {
        let (Some(min_x), Some(max_x)) = (self.slider_to_x(low), self.slider_to_x(high)) else {
            return Ok(());
        };
        check_window("x", min_x, max_x)?;
        self.apply_x_range(min_x, max_x);
        Ok(())
    }

    pub fn transform_min_x_range(&mut self, low: i32) -> ViewerResult<()> {
        let Some(min_x) = self.slider_to_x(low) else {
            return Ok(());
        };
        let max_x = self.effective_range().max.x;
        check_window("x", min_x, max_x)?;
        self.apply_x_range(min_x, max_x);
        Ok(())
    }

    pub fn transform_max_x_range(&mut self, high: i32) -> ViewerResult<()> {
        let Some(max_x) = self.slider_to_x(high) else {
            return Ok(());
        };
        let min_x = self.effective_range().min.x;
        check_window("x", min_x, max_x)?;
        self.apply_x_range(min_x, max_x);
        Ok(())
    }

    /// Maps a bottom-up slider window onto the series Y bounds.
    pub fn transform_y_range(&mut self, low: i32, high: i32) -> ViewerResult<()> {
        let (Some(min_y), Some(max_y)) = (self.slider_to_y(low), self.slider_to_y(high)) else {
            return Ok(());
        };
        self.change_y_range(min_y, max_y)
    }

    pub fn transform_min_y_range(&mut self, low: i32) -> ViewerResult<()> {
        let Some(min_y) = self.slider_to_y(low) else {
            return Ok(());
        };
        self.change_y_range(min_y, self.effective_range().max.y)
    }

    pub fn transform_max_y_range(&mut self, high: i32) -> ViewerResult<()> {
        let Some(max_y) = self.slider_to_y(high) else {
            return Ok(());
        };
        self.change_y_range(self.effective_range().min.y, max_y)
    }

    /// Applies a horizontal slider move reported by the host.
    ///
    /// The attached slider keeps its old handles when the resulting window is
    /// rejected.
    pub fn horizontal_slider_moved(
        &mut self,
        side: SliderSide,
        low: i32,
        high: i32,
    ) -> ViewerResult<()> {
        let mut moved = self.horizontal_slider;
        let (low, high) = match moved.as_mut() {
            Some(slider) => move_slider(slider, side, low, high),
            None => (low, high),
        };
        match side {
            SliderSide::None => Ok(()),
            SliderSide::LowHandle => self.transform_min_x_range(low),
            SliderSide::HighHandle => self.transform_max_x_range(high),
            SliderSide::Thumb => self.transform_x_range(low, high),
        }?;
        self.horizontal_slider = moved;
        Ok(())
    }

    /// Applies a vertical slider move; positions are top-down.
    pub fn vertical_slider_moved(
        &mut self,
        side: SliderSide,
        low: i32,
        high: i32,
    ) -> ViewerResult<()> {
        let mut moved = self.vertical_slider;
        let (low, high) = match moved.as_mut() {
            Some(slider) => move_slider(slider, side, low, high),
            None => (low, high),
        };
        let (scale_min, scale_max) = self.slider_scale(self.vertical_slider);
        let mirror = |value: i32| scale_min + scale_max - value;
        match side {
            SliderSide::None => Ok(()),
            SliderSide::LowHandle => self.transform_max_y_range(mirror(low)),
            SliderSide::HighHandle => self.transform_min_y_range(mirror(high)),
            SliderSide::Thumb => self.transform_y_range(mirror(high), mirror(low)),
        }?;
        self.vertical_slider = moved;
        Ok(())
    }

    pub fn validate_points(&mut self, start_x: f32, end_x: f32, valid: bool) {
        let Some(series) = self.series.as_mut() else {
            return;
        };
        let touched = series.set_valid_in_range(start_x, end_x, valid);
        debug!(band = series.id(), start_x, end_x, valid, touched, "validity changed");
        self.emit(ViewportEvent::ValidityChanged { start_x, end_x });
    }

    pub fn invalidate_points_outside(&mut self, start_x: f32, end_x: f32) {
        let Some(series) = self.series.as_mut() else {
            return;
        };
        series.set_valid_outside_range(start_x, end_x);
        debug!(band = series.id(), start_x, end_x, "points outside window invalidated");
        self.emit(ViewportEvent::ValidityChanged { start_x, end_x });
    }

    pub fn validate_all_points(&mut self, valid: bool) {
        let Some(series) = self.series.as_mut() else {
            return;
        };
        series.set_all_valid(valid);
        let (start_x, end_x) = (series.min_x(), series.max_x());
        debug!(band = series.id(), valid, "validity reset for all points");
        self.emit(ViewportEvent::ValidityChanged { start_x, end_x });
    }

    fn reset_plot_ranges(&mut self) {
        let Some(series) = self.series.as_ref() else {
            return;
        };
        let (min_x, max_x) = (series.min_x(), series.max_x());
        let (min_y, max_y) = (series.min_y(), series.max_y());
        let x_margin = fit_margin(min_x, max_x, min_x, max_x, self.config.x_margin_ratio);
        let y_margin = fit_margin(min_y, max_y, min_y, max_y, self.config.y_margin_ratio);
        self.visible_range = PlotRange::new(
            series.min_x() - x_margin,
            series.min_y() - y_margin,
            series.max_x() + x_margin,
            series.max_y() + y_margin,
        );
    }

    /// Refits Y after an X change.
    ///
    /// A constrained vertical slider wins: its window is mapped back onto the
    /// series Y bounds as is. Otherwise Y is fitted to the data inside the
    /// visible X window plus the Y margin. A flat fit is padded by the band's
    /// global margin so the visible range never loses its height.
    fn adjust_y_range_to_local_min_max(&mut self) {
        let Some(series) = self.series.as_ref() else {
            return;
        };
        let slider_window = match self.vertical_slider {
            Some(slider) if !slider.is_fully_stretched() => {
                let bottom_up_low = slider.mirror(slider.high_value());
                let bottom_up_high = slider.mirror(slider.low_value());
                self.slider_to_y(bottom_up_low)
                    .zip(self.slider_to_y(bottom_up_high))
                    .filter(|(min_y, max_y)| max_y > min_y)
            }
            _ => None,
        };
        let (min_y, max_y) = slider_window.unwrap_or_else(|| {
            let range = self.effective_range();
            let (min_y, max_y) = series.local_min_max_y(range.min.x, range.max.x);
            let margin = fit_margin(
                min_y,
                max_y,
                series.min_y(),
                series.max_y(),
                self.config.y_margin_ratio,
            );
            (min_y - margin, max_y + margin)
        });
        self.visible_range = self.effective_range().with_y(min_y, max_y);
    }

    fn slider_scale(&self, slider: Option<RangeSlider>) -> (i32, i32) {
        slider.map_or((self.config.slider_min, self.config.slider_max), |slider| {
            (slider.min(), slider.max())
        })
    }

    fn slider_to_x(&self, value: i32) -> Option<f32> {
        let series = self.series.as_ref()?;
        let (scale_min, scale_max) = self.slider_scale(self.horizontal_slider);
        Some(slider_to_data(
            value,
            scale_min,
            scale_max,
            series.min_x(),
            series.max_x(),
        ))
    }

    fn slider_to_y(&self, value: i32) -> Option<f32> {
        let series = self.series.as_ref()?;
        let (scale_min, scale_max) = self.slider_scale(self.vertical_slider);
        Some(slider_to_data(
            value,
            scale_min,
            scale_max,
            series.min_y(),
            series.max_y(),
        ))
    }

    /// Moves the horizontal slider to mirror the visible X window.
    fn sync_horizontal_slider(&mut self) {
        let (Some(slider), Some(series)) = (self.horizontal_slider.as_mut(), self.series.as_ref())
        else {
            return;
        };
        let data_span = series.max_x() - series.min_x();
        if data_span == 0.0 || self.visible_range.is_undefined() {
            return;
        }
        let slider_scale = slider.span() as f32 / data_span;
        let to_slider = |value: f32| {
            let position = slider.min() as f32 + (value - series.min_x()) * slider_scale;
            (position + 0.5).floor() as i32
        };
        let low = to_slider(self.visible_range.min.x);
        let high = to_slider(self.visible_range.max.x);
        slider.set_values(low, high);
        trace!(low, high, "horizontal slider synced");
    }

    fn refresh_transform(&mut self) {
        let range = self.effective_range();
        self.transform = match PlotTransform::new(self.viewport, self.config.insets, range) {
            Ok(transform) => Some(transform),
            Err(err) => {
                warn!(error = %err, "plot transform unavailable");
                None
            }
        };
    }

    fn emit(&mut self, event: ViewportEvent) {
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for listener in &mut self.listeners {
            listener.on_event(event, snapshot);
        }
    }

    fn emit_range_changed(&mut self) {
        self.emit(ViewportEvent::VisibleRangeChanged {
            range: self.visible_range,
        });
    }

    fn emit_selection_changed(&mut self) {
        self.emit(ViewportEvent::SelectionChanged {
            start: self.selection.start(),
            end: self.selection.end(),
        });
    }
}

/// Applies a host slider move and returns the clamped positions.
fn move_slider(slider: &mut RangeSlider, side: SliderSide, low: i32, high: i32) -> (i32, i32) {
    match side {
        SliderSide::None => {}
        SliderSide::LowHandle => slider.set_low_value(low),
        SliderSide::HighHandle => slider.set_high_value(high),
        SliderSide::Thumb => slider.set_values(low, high),
    }
    (slider.low_value(), slider.high_value())
}

/// Margin around `[min, max]`; a flat window borrows the margin of the outer bounds.
fn fit_margin(min: f32, max: f32, outer_min: f32, outer_max: f32, ratio: f32) -> f32 {
    [
        visibility_margin(min, max, ratio),
        visibility_margin(outer_min, outer_max, ratio),
    ]
    .into_iter()
    .find(|margin| *margin > 0.0)
    .unwrap_or_else(|| (min.abs() * ratio).max(0.5))
}

fn slider_to_data(value: i32, scale_min: i32, scale_max: i32, data_min: f32, data_max: f32) -> f32 {
    let data_scale = (data_max - data_min) / (scale_max - scale_min) as f32;
    data_min + (value - scale_min) as f32 * data_scale
}

fn check_window(axis: &str, min: f32, max: f32) -> ViewerResult<()> {
    if !min.is_finite() || !max.is_finite() || max <= min {
        return Err(ViewerError::InvalidData(format!(
            "{axis} window must be finite with max > min, got [{min}, {max}]"
        )));
    }
    Ok(())
}
