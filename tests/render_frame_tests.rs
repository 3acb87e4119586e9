use sequence_viewer::api::{PlotStyle, ViewportConfig, ViewportController};
use sequence_viewer::core::{PlotPoint, PointBuffer, Series};
use sequence_viewer::interaction::PointerButton;
use sequence_viewer::render::{NullRenderer, PlotFrame, Renderer};

fn series_with_negative_values() -> Series {
    Series::new(
        "V",
        PointBuffer::from_values(true, &[0.0, 1.0, 2.0, 3.0, 4.0]),
        (
            PointBuffer::from_values(false, &[-2.0, -1.0, 0.5, 1.5, 2.0]),
            PointBuffer::from_values(true, &[0.1, 0.2, 0.3, 0.4, 0.5]),
        ),
    )
    .expect("valid series")
}

fn build_controller(style: PlotStyle) -> ViewportController {
    let config = ViewportConfig::default().with_style(style);
    ViewportController::with_series(config, series_with_negative_values())
        .expect("controller init")
}

#[test]
fn frame_lists_points_ticks_and_range_label() {
    let controller = build_controller(PlotStyle::default());

    let frame = PlotFrame::from_controller(&controller).expect("frame");

    assert_eq!(frame.band.as_deref(), Some("V"));
    assert_eq!(frame.points.len(), 5);
    assert!(frame.points.iter().all(|point| point.error.is_none()));
    assert!(!frame.x_ticks.is_empty());
    assert!(!frame.y_ticks.is_empty());
    assert!(frame.y_ticks.iter().all(|tick| tick.offset_px <= 0));
    assert!(frame.zero_line.is_some());
    assert_eq!(
        frame.range_label.as_deref(),
        Some("Zoom Range x:[-0.0, 4.0], y:[-2.160, 2.160]")
    );
    frame.validate().expect("valid frame");
}

#[test]
fn style_controls_invalid_points_and_error_bars() {
    let style = PlotStyle {
        show_error_bars: true,
        show_invalid_points: false,
        ..PlotStyle::default()
    };
    let mut controller = build_controller(style);
    controller.validate_points(0.0, 1.0, false);

    let frame = PlotFrame::from_controller(&controller).expect("frame");

    assert_eq!(frame.points.len(), 3);
    assert_eq!(frame.valid_point_count(), 3);
    assert_eq!(frame.points[0].error, Some(0.3));
}

#[test]
fn invalid_points_are_kept_when_shown() {
    let mut controller = build_controller(PlotStyle::default());
    controller.validate_points(0.0, 1.0, false);

    let frame = PlotFrame::from_controller(&controller).expect("frame");

    assert_eq!(frame.points.len(), 5);
    assert_eq!(frame.valid_point_count(), 3);
    assert!(!frame.points[0].valid);
}

#[test]
fn frame_carries_selection_marker_while_dragging() {
    let mut controller = build_controller(PlotStyle::default());
    let transform = controller.transform().expect("transform");
    let (x0, y0) = transform.data_to_screen(PlotPoint::new(1.0, 0.0));
    let (x1, y1) = transform.data_to_screen(PlotPoint::new(3.0, 0.0));

    controller.pointer_down(PointerButton::Primary, x0, y0);
    controller.pointer_move(x1, y1);

    let frame = PlotFrame::from_controller(&controller).expect("frame");
    let marker = frame.selection.expect("selection marker");
    assert!(marker.end_x > marker.start_x);
}

#[test]
fn empty_controller_frames_pixel_space() {
    let controller = ViewportController::new(ViewportConfig::default()).expect("controller init");

    let frame = PlotFrame::from_controller(&controller).expect("frame");

    assert!(frame.is_empty());
    assert!(frame.band.is_none());
    assert!(frame.range_label.is_none());
    assert_eq!(frame.visible_range.max.x, 710.0);
}

#[test]
fn null_renderer_validates_and_counts() {
    let controller = build_controller(PlotStyle::default());
    let frame = PlotFrame::from_controller(&controller).expect("frame");
    let mut renderer = NullRenderer::default();

    renderer.render(&frame).expect("render");
    renderer.render(&frame).expect("render");

    assert_eq!(renderer.frames_rendered, 2);
    assert_eq!(renderer.last_point_count, 5);
    assert_eq!(
        renderer.last_tick_count,
        frame.x_ticks.len() + frame.y_ticks.len()
    );
}
