use chrono::{TimeZone, Utc};
use gantt_rs::core::{
    BaseTimeDomain, ExpansionState, MILLIS_PER_DAY, RowKey, Task, VisualRow, build_rows,
    datetime_to_millis,
};

fn day(d: u32) -> f64 {
    datetime_to_millis(Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap())
}

fn task(id: &str, parent: &str, row: usize, start: u32, end: u32) -> Task {
    Task::new(id, parent, row).with_range_millis(Some(day(start)), Some(day(end)))
}

#[test]
fn group_range_spans_every_child() {
    let tasks = vec![
        task("a", "P", 0, 1, 5),
        task("b", "P", 1, 3, 4),
        task("c", "P", 2, 2, 10),
    ];
    let (model, _) = build_rows(&tasks, &ExpansionState::default());
    let range = model.group_range("P").expect("range");
    assert_eq!(range.placed_range(), Some((day(1), day(10))));
}

#[test]
fn collapsed_group_still_reports_its_full_range() {
    let tasks = vec![task("a", "P", 0, 1, 5), task("b", "P", 1, 3, 20)];
    let mut expansion = ExpansionState::default();
    expansion.set("P", false);
    let (model, _) = build_rows(&tasks, &expansion);
    assert_eq!(model.len(), 1);
    assert_eq!(model.group_range("P").and_then(|range| range.end), Some(day(20)));
}

#[test]
fn groups_follow_first_seen_parent_order_and_default_to_expanded() {
    let tasks = vec![
        task("x", "Later", 0, 5, 6),
        task("y", "Sooner", 1, 1, 2),
        task("z", "Later", 2, 7, 8),
    ];
    let (model, expansion) = build_rows(&tasks, &ExpansionState::default());
    let keys: Vec<RowKey> = model.rows.iter().map(|row| row.key().clone()).collect();
    assert_eq!(
        keys,
        vec![
            RowKey::group("Later"),
            RowKey::task("x", "Later"),
            RowKey::task("z", "Later"),
            RowKey::group("Sooner"),
            RowKey::task("y", "Sooner"),
        ]
    );
    assert!(expansion.all_expanded());
    assert_eq!(expansion.len(), 2);
}

#[test]
fn undated_children_keep_their_rows_without_widening_the_group() {
    let tasks = vec![task("a", "P", 0, 2, 3), Task::new("loose", "P", 1)];
    let (model, _) = build_rows(&tasks, &ExpansionState::default());
    assert_eq!(model.len(), 3);
    assert!(matches!(model.rows[2], VisualRow::Task { task: 1, .. }));
    assert_eq!(model.group_range("P").and_then(|r| r.placed_range()), Some((day(2), day(3))));
}

#[test]
fn group_completion_is_the_mean_of_present_children() {
    let tasks = vec![
        task("a", "P", 0, 1, 2).with_completion(40.0),
        task("b", "P", 1, 1, 2).with_completion(0.8),
        task("c", "P", 2, 1, 2),
    ];
    let (model, _) = build_rows(&tasks, &ExpansionState::default());
    let completion = model.group_range("P").expect("range").completion;
    assert!((completion - 0.6).abs() < 1e-12);
}

#[test]
fn base_domain_pads_the_data_domain_by_the_buffer_plus_the_end_day() {
    let tasks = vec![task("a", "P", 0, 1, 5), task("b", "P", 1, 3, 10)];
    let base = BaseTimeDomain::from_tasks(&tasks, 2.0).expect("base");
    assert_eq!(base.data_domain().as_tuple(), (day(1), day(10)));
    let padded = base.base_domain();
    assert!((padded.start - (day(1) - 2.0 * MILLIS_PER_DAY)).abs() < 1.0);
    assert!((padded.end - (day(11) + 2.0 * MILLIS_PER_DAY)).abs() < 1.0);
}

#[test]
fn no_dated_task_means_no_base_domain() {
    let tasks = vec![Task::new("a", "P", 0), Task::new("b", "P", 1)];
    assert!(BaseTimeDomain::from_tasks(&tasks, 365.0).is_none());
}
