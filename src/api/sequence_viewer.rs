use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::core::Series;
use crate::error::{ViewerError, ViewerResult};
use crate::interaction::{InteractionMode, PointerButton};
use crate::io::{self, Dataset};

use super::{RangeSlider, SliderSide, ViewportConfig, ViewportController};

/// Stacked plots of one dataset, one controller per band.
///
/// While `affects_all_plots` holds, gestures and horizontal slider moves on
/// one band are replayed on every sibling so the bands stay aligned on X.
pub struct SequenceViewer {
    config: ViewportConfig,
    source_name: String,
    file_path: Option<PathBuf>,
    controllers: IndexMap<String, ViewportController>,
    mode: InteractionMode,
    affects_all_plots: bool,
}

impl SequenceViewer {
    /// Creates an empty viewer; call [`Self::load`] to show data.
    pub fn new(config: ViewportConfig) -> ViewerResult<Self> {
        Ok(Self {
            config: config.validate()?,
            source_name: String::new(),
            file_path: None,
            controllers: IndexMap::new(),
            mode: InteractionMode::default(),
            affects_all_plots: true,
        })
    }

    pub fn from_dataset(config: ViewportConfig, dataset: Dataset) -> ViewerResult<Self> {
        let mut viewer = Self::new(config)?;
        viewer.load(dataset)?;
        Ok(viewer)
    }

    pub fn open(config: ViewportConfig, path: impl AsRef<Path>) -> ViewerResult<Self> {
        Self::from_dataset(config, io::parse_file(path)?)
    }

    /// Replaces every plot with the bands of `dataset`.
    pub fn load(&mut self, dataset: Dataset) -> ViewerResult<()> {
        let source_name = dataset.source_name().to_owned();
        let file_path = dataset.file_path().map(Path::to_path_buf);

        let mut controllers = IndexMap::with_capacity(dataset.band_count());
        for (name, series) in dataset.into_bands() {
            let mut controller = ViewportController::new(self.config)?;
            controller.attach_horizontal_slider(self.new_slider()?);
            controller.attach_vertical_slider(self.new_slider()?);
            controller.set_mode(self.mode);
            controller.set_series(series);
            controllers.insert(name, controller);
        }

        debug!(source = %source_name, bands = controllers.len(), "dataset loaded");
        self.source_name = source_name;
        self.file_path = file_path;
        self.controllers = controllers;
        Ok(())
    }

    fn new_slider(&self) -> ViewerResult<RangeSlider> {
        RangeSlider::new(self.config.slider_min, self.config.slider_max)
    }

    #[must_use]
    pub fn config(&self) -> ViewportConfig {
        self.config
    }

    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// `"<source>  -  <path>"`, the heading shown above the plots.
    #[must_use]
    pub fn title(&self) -> String {
        match &self.file_path {
            Some(path) => format!("{}  -  {}", self.source_name, path.display()),
            None => self.source_name.clone(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    pub fn band_names(&self) -> impl Iterator<Item = &str> {
        self.controllers.keys().map(String::as_str)
    }

    #[must_use]
    pub fn controller(&self, band: &str) -> Option<&ViewportController> {
        self.controllers.get(band)
    }

    pub fn controller_mut(&mut self, band: &str) -> ViewerResult<&mut ViewportController> {
        self.controllers
            .get_mut(band)
            .ok_or_else(|| ViewerError::UnknownBand(band.to_owned()))
    }

    pub fn controllers(&self) -> impl Iterator<Item = (&str, &ViewportController)> {
        self.controllers
            .iter()
            .map(|(name, controller)| (name.as_str(), controller))
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Switches every plot to `mode`. Zoom always affects all plots.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
        if mode == InteractionMode::Zoom {
            self.affects_all_plots = true;
        }
        for controller in self.controllers.values_mut() {
            controller.set_mode(mode);
        }
        debug!(mode = ?mode, affects_all_plots = self.affects_all_plots, "mode changed");
    }

    #[must_use]
    pub fn affects_all_plots(&self) -> bool {
        self.affects_all_plots
    }

    /// Ignored while zooming.
    pub fn set_affects_all_plots(&mut self, affects_all_plots: bool) {
        if self.mode == InteractionMode::Zoom {
            trace!("affects-all-plots is fixed while zooming");
            return;
        }
        self.affects_all_plots = affects_all_plots;
    }

    fn siblings_of<'a>(
        &'a mut self,
        band: &'a str,
    ) -> impl Iterator<Item = &'a mut ViewportController> + 'a {
        let propagate = self.affects_all_plots;
        self.controllers
            .iter_mut()
            .filter(move |(name, _)| propagate && name.as_str() != band)
            .map(|(_, controller)| controller)
    }

    pub fn pointer_down(
        &mut self,
        band: &str,
        button: PointerButton,
        x: f64,
        y: f64,
    ) -> ViewerResult<bool> {
        if !self.controller_mut(band)?.pointer_down(button, x, y) {
            return Ok(false);
        }
        for sibling in self.siblings_of(band) {
            sibling.press_action(button, x, y, true);
        }
        Ok(true)
    }

    pub fn pointer_move(&mut self, band: &str, x: f64, y: f64) -> ViewerResult<bool> {
        if !self.controller_mut(band)?.pointer_move(x, y) {
            return Ok(false);
        }
        for sibling in self.siblings_of(band) {
            sibling.drag_action(x, y, true);
        }
        Ok(true)
    }

    pub fn pointer_up(&mut self, band: &str) -> ViewerResult<bool> {
        if !self.controller_mut(band)?.pointer_up() {
            return Ok(false);
        }
        for sibling in self.siblings_of(band) {
            sibling.release_action(true);
        }
        Ok(true)
    }

    /// Moves the horizontal slider of `band`, and of every sibling when linked.
    ///
    /// Every sibling is visited; the first sibling error is returned afterwards.
    pub fn horizontal_slider_moved(
        &mut self,
        band: &str,
        side: SliderSide,
        low: i32,
        high: i32,
    ) -> ViewerResult<()> {
        self.controller_mut(band)?
            .horizontal_slider_moved(side, low, high)?;
        let mut first_error = None;
        for sibling in self.siblings_of(band) {
            if let Err(err) = sibling.horizontal_slider_moved(side, low, high) {
                warn!(error = %err, "sibling slider move rejected");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Vertical ranges are per band and never propagate.
    pub fn vertical_slider_moved(
        &mut self,
        band: &str,
        side: SliderSide,
        low: i32,
        high: i32,
    ) -> ViewerResult<()> {
        self.controller_mut(band)?
            .vertical_slider_moved(side, low, high)
    }

    pub fn restore_all_original_ranges(&mut self) {
        for controller in self.controllers.values_mut() {
            controller.restore_original_ranges();
        }
    }

    /// Applies the same X window to every plot.
    pub fn change_x_range_on_all(&mut self, min_x: f32, max_x: f32) -> ViewerResult<()> {
        let mut first_error = None;
        for (band, controller) in &mut self.controllers {
            if let Err(err) = controller.change_x_range(min_x, max_x) {
                warn!(band = %band, error = %err, "x range rejected");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Hides every plot except `band`.
    pub fn show_only(&mut self, band: &str) -> ViewerResult<()> {
        if !self.controllers.contains_key(band) {
            return Err(ViewerError::UnknownBand(band.to_owned()));
        }
        for (name, controller) in &mut self.controllers {
            controller.set_visible(name == band);
        }
        Ok(())
    }

    pub fn show_all(&mut self) {
        for controller in self.controllers.values_mut() {
            controller.set_visible(true);
        }
    }

    pub fn visible_band_names(&self) -> impl Iterator<Item = &str> {
        self.controllers
            .iter()
            .filter(|(_, controller)| controller.is_visible())
            .map(|(name, _)| name.as_str())
    }

    /// Union of the data X bounds of the visible bands.
    #[must_use]
    pub fn visible_x_extent(&self) -> Option<(f32, f32)> {
        self.controllers
            .values()
            .filter(|controller| controller.is_visible())
            .filter_map(ViewportController::series)
            .map(|series| (series.min_x(), series.max_x()))
            .reduce(|(min_a, max_a), (min_b, max_b)| (min_a.min(min_b), max_a.max(max_b)))
    }

    /// Current bands, validity edits included.
    pub fn dataset(&self) -> ViewerResult<Dataset> {
        let bands: Vec<Series> = self
            .controllers
            .values()
            .filter_map(ViewportController::series)
            .cloned()
            .collect();
        let mut dataset = Dataset::new(self.source_name.clone(), bands)?;
        if let Some(path) = &self.file_path {
            dataset.set_file_path(path.clone());
        }
        Ok(dataset)
    }

    pub fn persist(&self, path: impl AsRef<Path>) -> ViewerResult<()> {
        io::persist(path, &self.dataset()?)
    }
}
