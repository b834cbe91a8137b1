use approx::assert_relative_eq;
use chrono::{DateTime, TimeZone, Utc};
use gantt_rs::api::{
    CellValue, ColumnHeaders, EXPANDED_GLYPH, GanttDataSet, GanttEngine, GanttEngineConfig,
    GanttUpdate, SourceRow,
};
use gantt_rs::core::{Granularity, SelectionHandle, Viewport, ZoomTransform, datetime_to_millis};
use gantt_rs::render::{Color, GanttLayerKind, LayeredRenderFrame, NullRenderer, RectPrimitive};

fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> CellValue {
    CellValue::DateTime(utc(y, m, d))
}

fn sample_data(design_completion: f64) -> GanttDataSet {
    let mut design = SourceRow::new("Design", "Phase A").with_dates(date(2024, 1, 1), date(2024, 1, 10));
    design.completion = CellValue::Number(design_completion);
    let mut build = SourceRow::new("Build", "Phase A").with_dates(date(2024, 1, 8), date(2024, 2, 15));
    build.predecessor = CellValue::text("Design");
    let test = SourceRow::new("Test", "Phase B").with_dates(date(2024, 2, 10), date(2024, 3, 1));
    GanttDataSet {
        rows: vec![design, build, test],
        ..GanttDataSet::default()
    }
}

fn loaded_engine(completion: f64, today: DateTime<Utc>) -> GanttEngine<NullRenderer> {
    engine_with(sample_data(completion), today)
}

fn engine_with(data: GanttDataSet, today: DateTime<Utc>) -> GanttEngine<NullRenderer> {
    let config = GanttEngineConfig::new(Viewport::new(1_400, 600));
    let mut engine = GanttEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.update(
        GanttUpdate::new(Viewport::new(1_400, 600))
            .with_data(data)
            .with_today(today),
    );
    engine
}

fn millis(time: DateTime<Utc>) -> f64 {
    datetime_to_millis(time)
}

/// Zooms to `pixels_per_day` with `left_edge` at the chart's left edge.
fn view_at(engine: &mut GanttEngine<NullRenderer>, pixels_per_day: f64, left_edge: DateTime<Utc>) {
    let original = engine.original_scale().expect("original scale");
    let k = pixels_per_day / original.pixels_per_day();
    let x = -original.map(millis(left_edge)) * k;
    engine
        .apply_gesture(ZoomTransform::new(k, x).expect("transform"))
        .expect("gesture");
}

/// Frame x of an instant through the current effective scale.
fn frame_x(engine: &GanttEngine<NullRenderer>, time: DateTime<Utc>) -> f64 {
    let chart_left = engine.layout().expect("layout").chart_left;
    chart_left + engine.effective_scale().expect("scale").map(millis(time))
}

fn rects_filled(frame: &LayeredRenderFrame, kind: GanttLayerKind, color: Color) -> Vec<RectPrimitive> {
    frame
        .layer(kind)
        .expect("layer")
        .rects
        .iter()
        .filter(|rect| rect.fill_color == color)
        .cloned()
        .collect()
}

fn calendar_line_xs(engine: &GanttEngine<NullRenderer>, frame: &LayeredRenderFrame) -> Vec<f64> {
    let color = engine.theme().calendar_line_color;
    frame
        .layer(GanttLayerKind::Background)
        .expect("background")
        .lines
        .iter()
        .filter(|line| line.color == color)
        .map(|line| line.x1)
        .collect()
}

fn frame(engine: &GanttEngine<NullRenderer>) -> LayeredRenderFrame {
    engine.build_layered_render_frame().expect("frame")
}

fn texts(frame: &LayeredRenderFrame, kind: GanttLayerKind) -> Vec<String> {
    frame
        .layer(kind)
        .expect("layer")
        .texts
        .iter()
        .map(|text| text.text.clone())
        .collect()
}

#[test]
fn same_state_yields_identical_frames() {
    let mut engine = loaded_engine(45.0, utc(2024, 1, 15));
    let first = frame(&engine);
    assert_eq!(first, frame(&engine));

    let landed = engine.transform();
    engine
        .apply_gesture(ZoomTransform::new(landed.k * 3.0, landed.x - 250.0).expect("transform"))
        .expect("zoom away");
    assert_ne!(first, frame(&engine));
    engine.apply_gesture(landed).expect("zoom back");
    assert_eq!(first, frame(&engine));
    assert!(engine.build_render_frame().expect("flat").validate().is_ok());
}

#[test]
fn percent_and_ratio_completion_draw_the_same_overlay() {
    let percent = frame(&loaded_engine(45.0, utc(2024, 1, 15)));
    let ratio = frame(&loaded_engine(0.45, utc(2024, 1, 15)));

    let overlay = |frame: &LayeredRenderFrame| {
        let layer = frame.layer(GanttLayerKind::Completion).expect("completion layer");
        assert_eq!(layer.rects.len(), 1);
        layer.rects[0].width
    };
    assert_relative_eq!(overlay(&percent), overlay(&ratio), epsilon = 1e-9);

    let bars = percent.layer(GanttLayerKind::Bars).expect("bars");
    let design = &bars.rects[0];
    assert_relative_eq!(overlay(&percent), design.width * 0.45, epsilon = 1e-9);
    assert_eq!(design.gradient_id.as_deref(), Some("bar-completion-1"));
    assert_eq!(percent.gradients.len(), 1);
    assert_relative_eq!(percent.gradients[0].split_ratio, 0.45, epsilon = 1e-12);
}

#[test]
fn bars_layer_holds_task_rects_and_group_paths() {
    let frame = frame(&loaded_engine(45.0, utc(2024, 1, 15)));
    let bars = frame.layer(GanttLayerKind::Bars).expect("bars");
    assert_eq!(bars.rects.len(), 3);
    assert_eq!(bars.paths.len(), 2);
    assert!(bars.rects.iter().all(|rect| rect.width > 0.0));
}

#[test]
fn predecessor_draws_one_connector_until_its_group_collapses() {
    let mut engine = loaded_engine(45.0, utc(2024, 1, 15));
    let dependencies = frame(&engine)
        .layer(GanttLayerKind::Dependencies)
        .expect("dependencies")
        .paths
        .len();
    assert_eq!(dependencies, 2);

    engine.set_group_expanded("Phase A", false).expect("collapse");
    let collapsed = frame(&engine);
    assert!(
        collapsed
            .layer(GanttLayerKind::Dependencies)
            .expect("dependencies")
            .paths
            .is_empty()
    );
    assert_eq!(engine.rows().len(), 3);
}

#[test]
fn today_marker_follows_the_visible_domain() {
    let inside = frame(&loaded_engine(45.0, utc(2024, 1, 15)));
    let markers = inside.layer(GanttLayerKind::Markers).expect("markers");
    assert_eq!(markers.lines.len(), 1);
    assert_eq!(texts(&inside, GanttLayerKind::Markers), vec!["Today".to_owned()]);

    let outside = frame(&loaded_engine(45.0, utc(2030, 6, 1)));
    let markers = outside.layer(GanttLayerKind::Markers).expect("markers");
    assert!(markers.lines.is_empty());
    assert!(markers.texts.is_empty());
}

#[test]
fn month_axis_labels_each_visible_month() {
    let frame = frame(&loaded_engine(45.0, utc(2024, 1, 15)));
    let labels = texts(&frame, GanttLayerKind::Axis);
    assert!(labels.contains(&"Jan 24".to_owned()), "{labels:?}");
    assert!(labels.contains(&"Feb 24".to_owned()), "{labels:?}");
    assert!(labels.contains(&"2024".to_owned()), "{labels:?}");
}

#[test]
fn label_panel_shows_group_glyphs_and_task_names() {
    let mut engine = loaded_engine(45.0, utc(2024, 1, 15));
    let labels = texts(&frame(&engine), GanttLayerKind::RowLabels);
    assert!(labels.contains(&format!("{EXPANDED_GLYPH} Phase A")), "{labels:?}");
    assert!(labels.contains(&"Design".to_owned()));
    assert!(labels.contains(&"01/01/2024 00:00".to_owned()));

    engine.toggle_group("Phase A").expect("toggle");
    let labels = texts(&frame(&engine), GanttLayerKind::RowLabels);
    assert!(!labels.contains(&"Design".to_owned()));
    assert!(labels.iter().any(|label| label.ends_with("Phase A") && !label.starts_with(EXPANDED_GLYPH)));
}

#[test]
fn selection_dims_every_other_bar() {
    let mut engine = loaded_engine(45.0, utc(2024, 1, 15));
    engine
        .set_selection(Some(SelectionHandle::new(0)))
        .expect("select design");
    let selected = frame(&engine);
    let bars = selected.layer(GanttLayerKind::Bars).expect("bars");

    assert_relative_eq!(bars.rects[0].fill_color.alpha, 1.0);
    assert_relative_eq!(bars.rects[1].fill_color.alpha, 0.3);
    assert_relative_eq!(bars.rects[2].fill_color.alpha, 0.3);
    let group_alpha = |index: usize| bars.paths[index].fill_color.expect("group fill").alpha;
    assert_relative_eq!(group_alpha(0), 1.0);
    assert_relative_eq!(group_alpha(1), 0.3);

    engine.set_selection(None).expect("clear");
    let cleared = frame(&engine);
    let bars = cleared.layer(GanttLayerKind::Bars).expect("bars");
    assert!(bars.rects.iter().all(|rect| (rect.fill_color.alpha - 1.0).abs() < 1e-12));
}

#[test]
fn placeholder_frame_before_any_data() {
    let config = GanttEngineConfig::new(Viewport::new(800, 400));
    let engine = GanttEngine::new(NullRenderer::default(), config).expect("engine init");
    let frame = engine.build_render_frame().expect("placeholder");
    assert!(engine.shows_placeholder());
    assert!(!frame.texts.is_empty());
    assert!(frame.validate().is_ok());
}

#[test]
fn day_view_shades_saturday_to_monday() {
    let mut engine = loaded_engine(45.0, utc(2024, 1, 15));
    view_at(&mut engine, 46.0, utc(2024, 1, 2));
    assert_eq!(engine.granularity(), Some(Granularity::Day));

    let frame = frame(&engine);
    let weekends = rects_filled(&frame, GanttLayerKind::Background, engine.theme().weekend_fill);
    assert_eq!(weekends.len(), 2);
    for (rect, saturday) in weekends.iter().zip([utc(2024, 1, 6), utc(2024, 1, 13)]) {
        let monday = saturday + chrono::Duration::days(2);
        assert_relative_eq!(rect.x, frame_x(&engine, saturday), epsilon = 1e-6);
        assert_relative_eq!(
            rect.width,
            frame_x(&engine, monday) - frame_x(&engine, saturday),
            epsilon = 1e-6
        );
    }
    assert!(calendar_line_xs(&engine, &frame).is_empty());
}

#[test]
fn day_view_marks_weekend_axis_labels() {
    let mut engine = loaded_engine(45.0, utc(2024, 1, 15));
    view_at(&mut engine, 46.0, utc(2024, 1, 2));

    let frame = frame(&engine);
    let labels = rects_filled(&frame, GanttLayerKind::Axis, engine.theme().weekend_label_fill);
    let weekend_days = [utc(2024, 1, 6), utc(2024, 1, 7), utc(2024, 1, 13), utc(2024, 1, 14)];
    assert_eq!(labels.len(), weekend_days.len());
    for (rect, day) in labels.iter().zip(weekend_days) {
        let next = day + chrono::Duration::days(1);
        assert_relative_eq!(rect.x, frame_x(&engine, day).floor(), epsilon = 1e-9);
        assert_relative_eq!(
            rect.width,
            frame_x(&engine, next).floor() - frame_x(&engine, day).floor(),
            epsilon = 1e-9
        );
    }
}

#[test]
fn hour_view_draws_day_boundaries() {
    let mut engine = loaded_engine(45.0, utc(2024, 1, 15));
    view_at(&mut engine, 300.0, Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap());
    assert_eq!(engine.granularity(), Some(Granularity::Hour));

    let frame = frame(&engine);
    let lines = calendar_line_xs(&engine, &frame);
    let days = [utc(2024, 1, 3), utc(2024, 1, 4), utc(2024, 1, 5)];
    assert_eq!(lines.len(), days.len());
    for (x, day) in lines.iter().zip(days) {
        assert_relative_eq!(*x, frame_x(&engine, day), epsilon = 1e-6);
    }
    assert!(rects_filled(&frame, GanttLayerKind::Background, engine.theme().weekend_fill).is_empty());
}

#[test]
fn month_view_draws_month_boundaries() {
    let mut engine = loaded_engine(45.0, utc(2024, 1, 15));
    view_at(&mut engine, 10.0, utc(2024, 1, 10));
    assert_eq!(engine.granularity(), Some(Granularity::Month));

    let frame = frame(&engine);
    let lines = calendar_line_xs(&engine, &frame);
    let months = [utc(2024, 2, 1), utc(2024, 3, 1)];
    assert_eq!(lines.len(), months.len());
    for (x, month) in lines.iter().zip(months) {
        assert_relative_eq!(*x, frame_x(&engine, month), epsilon = 1e-6);
    }
}

#[test]
fn year_view_has_no_calendar_background() {
    let mut engine = loaded_engine(45.0, utc(2024, 1, 15));
    view_at(&mut engine, 1.0, utc(2023, 10, 1));
    assert_eq!(engine.granularity(), Some(Granularity::Year));

    let frame = frame(&engine);
    assert!(calendar_line_xs(&engine, &frame).is_empty());
    assert!(rects_filled(&frame, GanttLayerKind::Background, engine.theme().weekend_fill).is_empty());
}

#[test]
fn secondary_ranges_draw_for_tasks_and_their_group() {
    let mut data = sample_data(45.0);
    data.rows[0].secondary_start = date(2024, 1, 2);
    data.rows[0].secondary_end = date(2024, 1, 5);
    data.rows[1].secondary_start = date(2024, 1, 9);
    data.rows[1].secondary_end = date(2024, 2, 20);
    let engine = engine_with(data, utc(2024, 1, 15));

    let frame = frame(&engine);
    let secondary = &frame.layer(GanttLayerKind::SecondaryBars).expect("secondary").rects;
    // Phase A group spans both children, then Design, then Build. Phase B has none.
    let spans = [
        (utc(2024, 1, 2), utc(2024, 2, 20)),
        (utc(2024, 1, 2), utc(2024, 1, 5)),
        (utc(2024, 1, 9), utc(2024, 2, 20)),
    ];
    assert_eq!(secondary.len(), spans.len());
    for (rect, (start, end)) in secondary.iter().zip(spans) {
        assert_relative_eq!(rect.x, frame_x(&engine, start), epsilon = 1e-6);
        assert_relative_eq!(rect.width, frame_x(&engine, end) - frame_x(&engine, start), epsilon = 1e-6);
        assert_relative_eq!(rect.height, engine.theme().secondary_bar_height);
    }
}

#[test]
fn legend_lists_values_in_first_seen_order_with_bar_colors() {
    let mut data = sample_data(45.0);
    for (row, legend) in data.rows.iter_mut().zip(["Core", "QA", "Core"]) {
        row.legend = CellValue::text(legend);
    }
    let engine = engine_with(data, utc(2024, 1, 15));

    let frame = frame(&engine);
    assert_eq!(texts(&frame, GanttLayerKind::Legend), vec!["Core".to_owned(), "QA".to_owned()]);
    let swatches = &frame.layer(GanttLayerKind::Legend).expect("legend").rects;
    assert_eq!(swatches.len(), 2);
    let chart_left = engine.layout().expect("layout").chart_left;
    assert_relative_eq!(swatches[0].x, chart_left);
    assert!(swatches[1].x > swatches[0].x);
    assert_ne!(swatches[0].fill_color, swatches[1].fill_color);

    let bars = &frame.layer(GanttLayerKind::Bars).expect("bars").rects;
    assert_eq!(bars[0].border_color, swatches[0].fill_color);
    assert_eq!(bars[1].border_color, swatches[1].fill_color);
    assert_eq!(bars[2].border_color, swatches[0].fill_color);
}

#[test]
fn extra_columns_reach_the_label_panel() {
    let mut data = sample_data(45.0);
    data.columns = ColumnHeaders {
        extra: vec!["Owner".to_owned()],
        ..ColumnHeaders::default()
    };
    data.rows[0].extra = vec![CellValue::text("Ana")];
    data.rows[0].tooltip = vec![CellValue::text("internal note")];
    let engine = engine_with(data, utc(2024, 1, 15));

    let labels = texts(&frame(&engine), GanttLayerKind::RowLabels);
    assert!(labels.contains(&"Owner".to_owned()), "{labels:?}");
    assert!(labels.contains(&"Ana".to_owned()), "{labels:?}");
    assert!(!labels.contains(&"internal note".to_owned()));
    assert_eq!(engine.tasks()[0].tooltip, vec!["internal note".to_owned()]);
    assert_eq!(engine.layout().expect("layout").panel_width, 10.0 + 250.0 + 160.0 + 160.0 + 120.0);
}
