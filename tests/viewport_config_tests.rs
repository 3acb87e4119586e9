use sequence_viewer::ViewerError;
use sequence_viewer::api::{PlotStyle, ViewportConfig, ViewportController};
use sequence_viewer::core::{PlotInsets, Viewport};

#[test]
fn default_config_matches_plot_layout() {
    let config = ViewportConfig::default();

    assert_eq!(config.viewport, Viewport::new(800, 400));
    assert_eq!(
        config.insets,
        PlotInsets {
            top: 10,
            left: 80,
            bottom: 50,
            right: 10,
        }
    );
    assert_eq!(config.insets.plot_width(config.viewport), 710);
    assert_eq!(config.insets.plot_height(config.viewport), 340);
    assert_eq!((config.slider_min, config.slider_max), (0, 100));
    assert_eq!((config.x_tick_count, config.y_tick_count), (15, 10));
    assert!(config.style.show_base_line);
    assert!(!config.style.show_error_bars);
}

#[test]
fn config_json_round_trip() {
    let config = ViewportConfig::new(Viewport::new(1024, 512))
        .with_margins(0.05, 0.1)
        .with_slider_scale(-10, 10)
        .with_tick_counts(8, 4)
        .with_style(PlotStyle {
            show_error_bars: true,
            ..PlotStyle::default()
        });

    let json = config.to_json_pretty().expect("serialize config");
    let parsed = ViewportConfig::from_json_str(&json).expect("parse config");

    assert_eq!(parsed, config);
}

#[test]
fn missing_json_fields_fall_back_to_defaults() {
    let parsed = ViewportConfig::from_json_str("{}").expect("parse empty config");
    assert_eq!(parsed, ViewportConfig::default());

    let parsed = ViewportConfig::from_json_str(r#"{"style": {"show_error_bars": true}}"#)
        .expect("parse partial config");
    assert!(parsed.style.show_error_bars);
    assert!(parsed.style.show_invalid_points);
}

#[test]
fn invalid_configs_are_rejected() {
    assert!(ViewportConfig::from_json_str(r#"{"slider_min": 5, "slider_max": 5}"#).is_err());
    assert!(ViewportConfig::from_json_str(r#"{"x_margin_ratio": -0.5}"#).is_err());
    assert!(ViewportConfig::from_json_str("not json").is_err());

    let tiny = ViewportConfig::new(Viewport::new(60, 40));
    assert!(matches!(
        ViewportController::new(tiny),
        Err(ViewerError::InvalidViewport {
            width: 60,
            height: 40
        })
    ));
}

#[test]
fn inset_hit_test_includes_edges() {
    let insets = PlotInsets::default();
    let viewport = Viewport::default();

    assert!(insets.contains(viewport, 80.0, 10.0));
    assert!(insets.contains(viewport, 790.0, 350.0));
    assert!(!insets.contains(viewport, 79.5, 100.0));
    assert!(!insets.contains(viewport, 400.0, 350.5));
}

#[test]
fn default_tracing_installs_at_most_once() {
    let _ = sequence_viewer::telemetry::init_default_tracing();
    assert!(!sequence_viewer::telemetry::init_default_tracing());
}
