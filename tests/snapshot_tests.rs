use chrono::{TimeZone, Utc};
use gantt_rs::api::{
    CellValue, EngineSnapshot, GanttDataSet, GanttEngine, GanttEngineConfig, GanttUpdate,
    RenderStatus, SourceRow,
};
use gantt_rs::core::{DisplayFormat, Granularity, Viewport};
use gantt_rs::interaction::InteractionMode;
use gantt_rs::render::NullRenderer;

fn date(y: i32, m: u32, d: u32) -> CellValue {
    CellValue::DateTime(Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap())
}

fn loaded_engine() -> GanttEngine<NullRenderer> {
    let config = GanttEngineConfig::new(Viewport::new(1_400, 600));
    let mut engine = GanttEngine::new(NullRenderer::default(), config).expect("engine init");
    let rows = vec![
        SourceRow::new("Design", "Phase A").with_dates(date(2024, 1, 1), date(2024, 1, 10)),
        SourceRow::new("Build", "Phase A").with_dates(date(2024, 1, 8), date(2024, 2, 15)),
        SourceRow::new("Test", "Phase B").with_dates(date(2024, 2, 10), date(2024, 3, 1)),
    ];
    engine.update(
        GanttUpdate::new(Viewport::new(1_400, 600))
            .with_data(GanttDataSet {
                rows,
                ..GanttDataSet::default()
            })
            .with_today(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()),
    );
    engine
}

#[test]
fn snapshot_describes_the_bound_dataset() {
    let engine = loaded_engine();
    let snapshot = engine.snapshot().expect("snapshot");

    assert_eq!(snapshot.data_revision, 1);
    assert_eq!(snapshot.task_count, 3);
    assert_eq!(snapshot.visible_rows, 5);
    assert_eq!(snapshot.granularity, Some(Granularity::Month));
    assert_eq!(snapshot.selected_format, DisplayFormat::All);
    assert_eq!(snapshot.interaction_mode, InteractionMode::Idle);
    assert_eq!(snapshot.original_range_px, Some((0.0, 800.0)));
    assert_eq!(
        snapshot.expanded_groups,
        vec![("Phase A".to_owned(), true), ("Phase B".to_owned(), true)]
    );
    assert_eq!(snapshot.frame.status, RenderStatus::Rendered);
    assert_eq!(snapshot.frame.gradients, 0);
    assert!(snapshot.frame.rects > 0);
}

#[test]
fn snapshot_json_is_stable_and_parses_back() {
    let engine = loaded_engine();
    let first = engine.snapshot_json_pretty().expect("json");
    assert_eq!(first, engine.snapshot_json_pretty().expect("json again"));

    let parsed: EngineSnapshot = serde_json::from_str(&first).expect("parse snapshot");
    let snapshot = engine.snapshot().expect("snapshot");
    assert_eq!(parsed.frame, snapshot.frame);
    assert_eq!(parsed.expanded_groups, snapshot.expanded_groups);
    assert_eq!(parsed.data_domain, snapshot.data_domain);
}

#[test]
fn placeholder_snapshot_has_no_domains() {
    let config = GanttEngineConfig::new(Viewport::new(800, 400));
    let engine = GanttEngine::new(NullRenderer::default(), config).expect("engine init");
    let snapshot = engine.snapshot().expect("snapshot");
    assert_eq!(snapshot.frame.status, RenderStatus::Placeholder);
    assert_eq!(snapshot.base_domain, None);
    assert_eq!(snapshot.visible_domain, None);
    assert_eq!(snapshot.granularity, None);
}
