use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use sequence_viewer::api::{
    RangeSlider, ViewportConfig, ViewportController, ViewportEvent, ViewportListener,
    ViewportSnapshot,
};
use sequence_viewer::core::{PlotPoint, PlotRange, PointBuffer, Series, Viewport};
use sequence_viewer::interaction::{InteractionMode, PointerButton};

fn sample_series() -> Series {
    Series::new(
        "V",
        PointBuffer::from_values(true, &[0.0, 1.0, 2.0, 3.0, 4.0]),
        (
            PointBuffer::from_values(false, &[10.0, 20.0, 5.0, 30.0, 15.0]),
            PointBuffer::from_values(true, &[0.5; 5]),
        ),
    )
    .expect("valid series")
}

fn build_controller() -> ViewportController {
    ViewportController::with_series(ViewportConfig::default(), sample_series())
        .expect("controller init")
}

fn screen_of(controller: &ViewportController, x: f32, y: f32) -> (f64, f64) {
    controller
        .transform()
        .expect("drawable transform")
        .data_to_screen(PlotPoint::new(x, y))
}

fn assert_range_eq(actual: PlotRange, expected: PlotRange) {
    assert_abs_diff_eq!(actual.min.x, expected.min.x, epsilon = 1e-4);
    assert_abs_diff_eq!(actual.max.x, expected.max.x, epsilon = 1e-4);
    assert_abs_diff_eq!(actual.min.y, expected.min.y, epsilon = 1e-4);
    assert_abs_diff_eq!(actual.max.y, expected.max.y, epsilon = 1e-4);
}

#[derive(Clone, Default)]
struct RecordingListener {
    events: Rc<RefCell<Vec<ViewportEvent>>>,
}

impl ViewportListener for RecordingListener {
    fn on_event(&mut self, event: ViewportEvent, _snapshot: ViewportSnapshot) {
        self.events.borrow_mut().push(event);
    }
}

#[test]
fn natural_range_pads_data_bounds() {
    let controller = build_controller();

    assert_range_eq(
        controller.visible_range(),
        PlotRange::new(-0.04, 4.0, 4.04, 31.0),
    );
    assert!(controller.zoom_history().is_empty());
}

#[test]
fn undefined_range_resolves_to_plot_pixels() {
    let controller = ViewportController::new(ViewportConfig::default()).expect("controller init");

    assert!(controller.visible_range().is_undefined());
    assert_eq!(
        controller.effective_range(),
        PlotRange::new(0.0, 0.0, 710.0, 340.0)
    );
    assert!(controller.transform().is_some());
}

#[test]
fn zoom_in_fits_y_to_local_data_and_zoom_out_restores() {
    let mut controller = build_controller();
    let natural = controller.visible_range();

    controller.zoom_in(1.0, 2.0);
    assert_eq!(controller.zoom_history(), &[natural]);
    assert_range_eq(
        controller.visible_range(),
        PlotRange::new(1.0, 4.4, 2.0, 20.6),
    );

    controller.zoom_out();
    assert_eq!(controller.visible_range(), natural);
    assert!(controller.zoom_history().is_empty());
}

#[test]
fn nested_zooms_unwind_in_order() {
    let mut controller = build_controller();
    let natural = controller.visible_range();

    controller.zoom_in(0.0, 3.0);
    let first = controller.visible_range();
    controller.zoom_in(1.0, 2.0);
    assert_eq!(controller.zoom_history().len(), 2);

    controller.zoom_out();
    assert_eq!(controller.visible_range(), first);
    controller.zoom_out();
    assert_eq!(controller.visible_range(), natural);
}

#[test]
fn zoom_out_with_empty_history_and_no_slider_is_noop() {
    let mut controller = build_controller();
    let before = controller.visible_range();

    controller.zoom_out();

    assert_eq!(controller.visible_range(), before);
    assert!(controller.zoom_history().is_empty());
}

#[test]
fn zoom_out_with_empty_history_restores_natural_range_when_slider_attached() {
    let mut controller = build_controller();
    controller.attach_horizontal_slider(RangeSlider::new(0, 100).expect("valid slider"));
    let natural = controller.visible_range();
    controller.change_x_range(1.0, 3.0).expect("x range");

    controller.zoom_out();

    assert_eq!(controller.visible_range(), natural);
    let slider = controller.horizontal_slider().expect("slider attached");
    assert!(slider.is_fully_stretched());
}

#[test]
fn change_xy_ranges_pushes_history() {
    let mut controller = build_controller();
    let natural = controller.visible_range();

    controller
        .change_xy_ranges(0.5, 1.5, 0.0, 50.0)
        .expect("explicit range");
    assert_eq!(controller.visible_range(), PlotRange::new(0.5, 0.0, 1.5, 50.0));
    assert_eq!(controller.zoom_history(), &[natural]);

    assert!(controller.change_xy_ranges(2.0, 1.0, 0.0, 1.0).is_err());
    assert!(controller.change_y_range(3.0, 3.0).is_err());
}

#[test]
fn drag_selection_in_zoom_mode_zooms_into_x_window() {
    let mut controller = build_controller();
    let natural = controller.visible_range();
    let (x0, y0) = screen_of(&controller, 1.0, 20.0);
    let (x1, y1) = screen_of(&controller, 3.0, 10.0);

    assert!(controller.pointer_down(PointerButton::Primary, x0, y0));
    assert!(controller.pointer_move(x1, y1));
    let marker = controller.selection_marker().expect("selection in progress");
    assert_abs_diff_eq!(marker.start_x, 1.0, epsilon = 1e-3);
    assert_abs_diff_eq!(marker.end_x, 3.0, epsilon = 1e-3);
    assert_abs_diff_eq!(marker.y, 10.0, epsilon = 1e-3);
    assert!(marker.tick_half_height > 0.0);

    assert!(controller.pointer_up());
    let range = controller.visible_range();
    assert_abs_diff_eq!(range.min.x, 1.0, epsilon = 1e-3);
    assert_abs_diff_eq!(range.max.x, 3.0, epsilon = 1e-3);
    assert_eq!(controller.zoom_history(), &[natural]);
    assert!(controller.selection_marker().is_none());
}

#[test]
fn single_point_zoom_keeps_height_and_click_zooms_out() {
    let mut controller = build_controller();
    let natural = controller.visible_range();
    let (x0, y0) = screen_of(&controller, 0.9, 20.0);
    let (x1, y1) = screen_of(&controller, 1.1, 20.0);

    assert!(controller.pointer_down(PointerButton::Primary, x0, y0));
    assert!(controller.pointer_move(x1, y1));
    assert!(controller.pointer_up());

    let range = controller.visible_range();
    assert_abs_diff_eq!(range.min.y, 19.0, epsilon = 1e-3);
    assert_abs_diff_eq!(range.max.y, 21.0, epsilon = 1e-3);
    assert!(controller.transform().is_some());

    assert!(controller.pointer_down(PointerButton::Primary, 400.0, 200.0));
    assert!(controller.pointer_up());
    assert_eq!(controller.visible_range(), natural);
    assert!(controller.zoom_history().is_empty());
}

#[test]
fn click_without_drag_zooms_out() {
    let mut controller = build_controller();
    let natural = controller.visible_range();
    controller.zoom_in(1.0, 3.0);

    let (x, y) = screen_of(&controller, 2.0, 10.0);
    assert!(controller.pointer_down(PointerButton::Primary, x, y));
    assert!(controller.pointer_up());

    assert_eq!(controller.visible_range(), natural);
}

#[test]
fn press_outside_plot_area_disables_gesture() {
    let mut controller = build_controller();
    let before = controller.visible_range();

    assert!(!controller.pointer_down(PointerButton::Primary, 5.0, 5.0));
    assert!(!controller.pointer_move(400.0, 200.0));
    assert!(!controller.pointer_up());

    assert_eq!(controller.visible_range(), before);
    assert!(controller.zoom_history().is_empty());
}

#[test]
fn secondary_button_never_selects() {
    let mut controller = build_controller();
    let before = controller.visible_range();
    let (x0, y0) = screen_of(&controller, 1.0, 20.0);
    let (x1, y1) = screen_of(&controller, 3.0, 10.0);

    assert!(controller.pointer_down(PointerButton::Secondary, x0, y0));
    controller.pointer_move(x1, y1);
    controller.pointer_up();

    assert!(controller.selection_marker().is_none());
    assert_eq!(controller.visible_range(), before);
}

#[test]
fn drag_is_clamped_to_visible_range() {
    let mut controller = build_controller();
    let range = controller.visible_range();
    let (x0, y0) = screen_of(&controller, 2.0, 20.0);

    controller.pointer_down(PointerButton::Primary, x0, y0);
    controller.pointer_move(2_000.0, 2_000.0);

    let selection = controller.selection();
    assert_eq!(selection.end().x, range.max.x);
    assert_eq!(selection.end().y, range.min.y);
}

#[test]
fn set_viewport_rejects_sizes_without_plot_area() {
    let mut controller = build_controller();

    assert!(controller.set_viewport(Viewport::new(50, 30)).is_err());
    controller
        .set_viewport(Viewport::new(1200, 600))
        .expect("larger viewport");
    let (x_scale, _) = controller.transform().expect("transform").scale();
    assert_abs_diff_eq!(x_scale, 1110.0 / 4.08, epsilon = 1e-2);
}

#[test]
fn set_series_resets_history_and_notifies_listeners() {
    let mut controller = build_controller();
    let listener = RecordingListener::default();
    let events = Rc::clone(&listener.events);
    controller.add_listener(Box::new(listener));

    controller.zoom_in(1.0, 2.0);
    controller.set_series(sample_series());

    assert!(controller.zoom_history().is_empty());
    let events = events.borrow();
    assert!(matches!(events[0], ViewportEvent::ZoomedIn { depth: 1 }));
    assert!(events.contains(&ViewportEvent::SeriesLoaded { points_len: 5 }));
    assert!(matches!(
        events.last(),
        Some(ViewportEvent::VisibleRangeChanged { .. })
    ));
}

#[test]
fn mode_captions_cover_every_mode() {
    let captions: Vec<&str> = InteractionMode::ALL
        .iter()
        .map(|mode| mode.caption())
        .collect();
    assert_eq!(captions, vec!["Zoom", "Valid", "Invalid", "Invalid Out"]);
    assert_eq!(InteractionMode::default(), InteractionMode::Zoom);
}
