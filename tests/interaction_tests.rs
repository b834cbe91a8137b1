use approx::assert_abs_diff_eq;
use chrono::{TimeZone, Utc};
use gantt_rs::api::{
    CellValue, GanttDataSet, GanttEngine, GanttEngineConfig, GanttUpdate, SELECTED_FORMAT_KEY,
    SourceRow,
};
use gantt_rs::core::{DisplayFormat, Viewport, ZoomTransform};
use gantt_rs::interaction::InteractionMode;
use gantt_rs::render::NullRenderer;

fn date(y: i32, m: u32, d: u32) -> CellValue {
    CellValue::DateTime(Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap())
}

fn engine_with_rows(count: usize) -> GanttEngine<NullRenderer> {
    let rows = (0..count)
        .map(|index| {
            let day = u32::try_from(index % 28).expect("day") + 1;
            SourceRow::new(format!("Task {index}"), format!("Group {}", index / 10))
                .with_dates(date(2024, 3, day), date(2024, 4, day))
        })
        .collect();
    let config = GanttEngineConfig::new(Viewport::new(1_400, 600));
    let mut engine = GanttEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.update(
        GanttUpdate::new(Viewport::new(1_400, 600)).with_data(GanttDataSet {
            rows,
            ..GanttDataSet::default()
        }),
    );
    engine
}

#[test]
fn gestures_move_only_the_transform() {
    let mut engine = engine_with_rows(3);
    let original = engine.original_scale().expect("original scale");

    engine.begin_gesture();
    assert_eq!(engine.interaction_mode(), InteractionMode::Gesturing);
    for step in 1..=5 {
        let raw = ZoomTransform::new(1.5 * f64::from(step), -40.0 * f64::from(step)).expect("raw");
        engine.apply_gesture(raw).expect("gesture");
        assert_eq!(engine.original_scale(), Some(original));
    }
    engine.end_gesture();
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
    assert_eq!(engine.transform(), ZoomTransform::new(7.5, -200.0).expect("last"));
}

#[test]
fn gesture_end_records_the_landed_granularity() {
    let mut engine = engine_with_rows(3);
    engine.drain_persist_requests();

    engine.begin_gesture();
    engine.wheel_zoom(-20.0, 900.0).expect("zoom out");
    engine.end_gesture();

    let granularity = engine.granularity().expect("granularity");
    assert_eq!(engine.selected_format(), granularity.display_format());
    assert_eq!(
        engine.persisted_value(SELECTED_FORMAT_KEY),
        Some(granularity.display_format().as_str())
    );
}

#[test]
fn gesture_transform_is_clamped_to_zoom_limits() {
    let mut engine = engine_with_rows(3);
    engine
        .apply_gesture(ZoomTransform::new(1e9, 0.0).expect("raw"))
        .expect("gesture");
    assert_eq!(engine.transform().k, engine.config().zoom_limits.max_scale_factor);

    let nan = ZoomTransform { k: f64::NAN, x: 0.0 };
    assert!(engine.apply_gesture(nan).is_err());
}

#[test]
fn wheel_zoom_keeps_the_date_under_the_cursor() {
    let mut engine = engine_with_rows(3);
    let chart_left = engine.layout().expect("layout").chart_left;
    let before = engine.effective_scale().expect("scale").invert(300.0);

    engine.wheel_zoom(3.0, chart_left + 300.0).expect("wheel");
    let after = engine.effective_scale().expect("scale");
    assert_abs_diff_eq!(after.map(before), 300.0, epsilon = 1e-6);

    engine.wheel_zoom(1_000.0, chart_left + 300.0).expect("wheel");
    assert_eq!(engine.transform().k, engine.config().zoom_limits.max_scale_factor);
}

#[test]
fn reset_animation_is_stepped_by_the_host() {
    let mut engine = engine_with_rows(3);
    let zoomed = engine.request_format(DisplayFormat::Day).expect("day");
    assert!(engine.reset_zoom_animated().expect("reset"));
    assert_eq!(engine.interaction_mode(), InteractionMode::Animating);

    assert!(engine.advance_animation(250.0).expect("step"));
    let mid = engine.transform();
    assert!(mid.k < zoomed.k && mid.k > 1.0);

    assert!(!engine.advance_animation(250.0).expect("last step"));
    assert_eq!(engine.transform(), ZoomTransform::IDENTITY);
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
    assert!(!engine.advance_animation(16.0).expect("idle"));
}

#[test]
fn grabbing_the_chart_stops_the_reset_animation() {
    let mut engine = engine_with_rows(3);
    engine.request_format(DisplayFormat::Day).expect("day");
    engine.reset_zoom_animated().expect("reset");
    engine.advance_animation(100.0).expect("step");
    let grabbed = engine.transform();

    engine.begin_gesture();
    assert!(!engine.advance_animation(100.0).expect("cancelled"));
    assert_eq!(engine.transform(), grabbed);
    assert_eq!(engine.interaction_mode(), InteractionMode::Gesturing);
}

#[test]
fn scroll_is_clamped_to_row_content() {
    let mut engine = engine_with_rows(30);
    let rows = engine.rows().len() as f64;
    let layout = engine.layout().expect("layout").clone();
    let max_top = rows * engine.theme().row_height - layout.body_height;

    engine.scroll_to(10_000.0).expect("scroll");
    assert_eq!(engine.scroll_offset().top, max_top);
    engine.scroll_by(-100.0).expect("scroll");
    assert_eq!(engine.scroll_offset().top, max_top - 100.0);
    engine.scroll_to(-5.0).expect("scroll");
    assert_eq!(engine.scroll_offset().top, 0.0);
    assert!(engine.scroll_to(f64::NAN).is_err());
}

#[test]
fn collapsing_groups_pulls_scroll_back_into_range() {
    let mut engine = engine_with_rows(30);
    engine.scroll_to(10_000.0).expect("scroll");
    engine.set_all_expanded(false);
    assert!(!engine.all_expanded());
    assert_eq!(engine.rows().len(), 3);
    assert_eq!(engine.scroll_offset().top, 0.0);
}

#[test]
fn render_if_needed_coalesces_gesture_updates() {
    let mut engine = engine_with_rows(3);
    let frames = engine.renderer().frames_rendered;
    assert!(!engine.render_if_needed().expect("clean"));

    for _ in 0..3 {
        engine.pan_by(-12.0).expect("pan");
    }
    assert!(engine.has_pending_invalidation());
    assert!(engine.render_if_needed().expect("dirty"));
    assert!(!engine.render_if_needed().expect("clean again"));
    assert_eq!(engine.renderer().frames_rendered, frames + 1);
}

#[test]
fn operations_without_data_report_no_usable_data() {
    let config = GanttEngineConfig::new(Viewport::new(1_400, 600));
    let mut engine = GanttEngine::new(NullRenderer::default(), config).expect("engine init");
    assert!(engine.pan_by(10.0).is_err());
    assert!(engine.reset_zoom_animated().is_err());
    assert!(engine.toggle_group("Nope").is_err());
}
