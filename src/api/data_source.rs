use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use tracing::trace;

use crate::core::{Task, datetime_to_millis, decimal_to_f64, normalize_completion};

pub const UNGROUPED_PARENT: &str = "Ungrouped";
pub const FIELD_SEPARATOR: &str = " | ";

/// One typed cell of the host table.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Decimal(Decimal),
    DateTime(DateTime<Utc>),
}

impl CellValue {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => text.clone(),
            Self::Number(value) => format_number(*value),
            Self::Decimal(value) => value.normalize().to_string(),
            Self::DateTime(time) => time.format("%d/%m/%Y %H:%M").to_string(),
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => Some(*value),
            Self::Decimal(value) => decimal_to_f64(*value, "cell").ok(),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
            Self::Empty | Self::DateTime(_) => None,
        }?;
        value.is_finite().then_some(value)
    }

    /// Reads the cell as an instant; numbers are epoch milliseconds.
    #[must_use]
    pub fn as_millis(&self) -> Option<f64> {
        match self {
            Self::DateTime(time) => Some(datetime_to_millis(*time)),
            Self::Number(value) => value.is_finite().then_some(*value),
            Self::Decimal(value) => decimal_to_f64(*value, "date cell").ok(),
            Self::Text(text) => parse_date_text(text).map(datetime_to_millis),
            Self::Empty => None,
        }
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Parses RFC 3339 and a few ISO-like layouts, always as UTC.
#[must_use]
pub fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Some(time.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Display names of the bound columns, used for the label-panel header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeaders {
    pub task: Vec<String>,
    pub start: String,
    pub end: String,
    pub secondary_start: String,
    pub secondary_end: String,
    pub duration: String,
    pub extra: Vec<String>,
}

impl Default for ColumnHeaders {
    fn default() -> Self {
        Self {
            task: vec!["Task".to_owned()],
            start: "Start".to_owned(),
            end: "End".to_owned(),
            secondary_start: "Secondary start".to_owned(),
            secondary_end: "Secondary end".to_owned(),
            duration: "Duration".to_owned(),
            extra: Vec::new(),
        }
    }
}

/// One host row, with cells already mapped to their roles.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceRow {
    pub task: Vec<CellValue>,
    pub parent: Vec<CellValue>,
    pub start: CellValue,
    pub end: CellValue,
    pub secondary_start: CellValue,
    pub secondary_end: CellValue,
    pub duration: CellValue,
    pub completion: CellValue,
    pub predecessor: CellValue,
    pub legend: CellValue,
    /// Extra display columns.
    pub extra: Vec<CellValue>,
    /// Tooltip-only values; carried through but never drawn.
    pub tooltip: Vec<CellValue>,
}

impl SourceRow {
    #[must_use]
    pub fn new(task: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            task: vec![CellValue::text(task)],
            parent: vec![CellValue::text(parent)],
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_dates(mut self, start: CellValue, end: CellValue) -> Self {
        self.start = start;
        self.end = end;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GanttDataSet {
    pub columns: ColumnHeaders,
    pub rows: Vec<SourceRow>,
}

impl GanttDataSet {
    #[must_use]
    pub fn new(columns: ColumnHeaders, rows: Vec<SourceRow>) -> Self {
        Self { columns, rows }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Converts host rows into tasks. Never fails: unusable cells become `None`.
#[must_use]
pub fn parse_tasks(data: &GanttDataSet) -> Vec<Task> {
    let tasks: Vec<Task> = data
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| parse_row(index, row))
        .collect();
    trace!(
        rows = data.rows.len(),
        dated = tasks.iter().filter(|task| task.placed_range().is_some()).count(),
        "parsed source rows"
    );
    tasks
}

fn parse_row(index: usize, row: &SourceRow) -> Task {
    let fields: Vec<String> = row.task.iter().map(CellValue::display_text).collect();
    let parent = joined(&row.parent);
    let parent = if parent.trim().is_empty() {
        UNGROUPED_PARENT.to_owned()
    } else {
        parent
    };

    let mut task = Task::new(fields.join(FIELD_SEPARATOR), parent, index)
        .with_range_millis(row.start.as_millis(), row.end.as_millis());
    task.secondary_start = row.secondary_start.as_millis();
    task.secondary_end = row.secondary_end.as_millis();
    task.completion = row.completion.as_f64().and_then(normalize_completion);
    task.duration = row.duration.as_f64();
    task.predecessor = (!row.predecessor.is_empty()).then(|| row.predecessor.display_text());
    task.legend = (!row.legend.is_empty()).then(|| row.legend.display_text());
    task.fields = fields;
    task.extra = row.extra.iter().map(CellValue::display_text).collect();
    task.tooltip = row.tooltip.iter().map(CellValue::display_text).collect();
    task
}

fn joined(cells: &[CellValue]) -> String {
    cells
        .iter()
        .map(CellValue::display_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR)
}
