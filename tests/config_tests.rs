use gantt_rs::GanttError;
use gantt_rs::api::{GanttEngine, GanttEngineConfig, GanttTheme};
use gantt_rs::core::{DisplayFormat, GranularityThresholds, Viewport};
use gantt_rs::render::NullRenderer;

#[test]
fn config_json_round_trip_preserves_every_field() {
    let config = GanttEngineConfig::new(Viewport::new(1_280, 720))
        .with_zoom_limits(0.5, 500.0)
        .with_base_domain_buffer_days(30.0)
        .with_reset_min_overlap_ratio(0.1)
        .with_zoom_anchor_offset_px(12.0)
        .with_reset_animation_ms(250.0)
        .with_wheel_zoom_step(1.5)
        .with_initial_format(DisplayFormat::Month);

    let json = config.to_json_pretty().expect("serialize");
    let parsed = GanttEngineConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn minimal_json_fills_defaults() {
    let parsed = GanttEngineConfig::from_json_str(r#"{"viewport":{"width":900,"height":500}}"#)
        .expect("parse");
    assert_eq!(parsed, GanttEngineConfig::new(Viewport::new(900, 500)));
    assert_eq!(parsed.base_domain_buffer_days, 365.0);
    assert_eq!(parsed.zoom_limits.max_scale_factor, 2_000.0);
    assert_eq!(parsed.initial_format, DisplayFormat::All);
}

#[test]
fn malformed_json_is_a_config_error() {
    let err = GanttEngineConfig::from_json_str("{\"viewport\":").expect_err("truncated");
    assert!(matches!(err, GanttError::InvalidConfig(_)));
}

#[test]
fn engine_rejects_invalid_numeric_settings() {
    let viewport = Viewport::new(800, 400);
    let invalid = [
        GanttEngineConfig::new(viewport).with_zoom_limits(2.0, 100.0),
        GanttEngineConfig::new(viewport).with_zoom_limits(0.5, 0.9),
        GanttEngineConfig::new(viewport).with_base_domain_buffer_days(-1.0),
        GanttEngineConfig::new(viewport).with_reset_min_overlap_ratio(1.5),
        GanttEngineConfig::new(viewport).with_zoom_anchor_offset_px(f64::NAN),
        GanttEngineConfig::new(viewport).with_reset_animation_ms(-10.0),
        GanttEngineConfig::new(viewport).with_wheel_zoom_step(1.0),
        GanttEngineConfig::new(viewport).with_granularity_thresholds(GranularityThresholds {
            hour_above_px_per_day: 10.0,
            day_above_px_per_day: 17.0,
            month_above_px_per_day: 2.0,
        }),
    ];
    for config in invalid {
        let result = GanttEngine::new(NullRenderer::default(), config.clone());
        assert!(
            matches!(result, Err(GanttError::InvalidConfig(_))),
            "accepted {config:?}"
        );
    }
}

#[test]
fn zero_sized_viewport_is_rejected_at_init() {
    let result = GanttEngine::new(
        NullRenderer::default(),
        GanttEngineConfig::new(Viewport::new(0, 400)),
    );
    assert!(matches!(
        result,
        Err(GanttError::InvalidViewport {
            width: 0,
            height: 400
        })
    ));
}

#[test]
fn theme_validation_rejects_non_positive_row_height() {
    let theme = GanttTheme {
        row_height: 0.0,
        ..GanttTheme::default()
    };
    let config = GanttEngineConfig::new(Viewport::new(800, 400)).with_theme(theme);
    assert!(GanttEngine::new(NullRenderer::default(), config).is_err());

    let mut engine = GanttEngine::new(
        NullRenderer::default(),
        GanttEngineConfig::new(Viewport::new(800, 400)),
    )
    .expect("engine init");
    let bad = GanttTheme {
        unselected_bar_opacity: 2.0,
        ..GanttTheme::default()
    };
    assert!(engine.set_theme(bad).is_err());
    assert_eq!(engine.theme(), &GanttTheme::default());
}
