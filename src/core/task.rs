use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::completion::normalize_completion;
use crate::core::primitives::datetime_to_millis;

/// Stable handle used to address a source row in selection requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SelectionHandle(usize);

impl SelectionHandle {
    #[must_use]
    pub const fn new(source_row: usize) -> Self {
        Self(source_row)
    }

    #[must_use]
    pub const fn source_row(self) -> usize {
        self.0
    }
}

/// One source record, already parsed from the host table.
///
/// Times are epoch milliseconds (UTC). Missing or unparseable dates are
/// `None`; such tasks keep their row but place no bar geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub parent: String,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub secondary_start: Option<f64>,
    pub secondary_end: Option<f64>,
    /// Normalized into `[0, 1]`.
    pub completion: Option<f64>,
    pub duration: Option<f64>,
    pub predecessor: Option<String>,
    pub legend: Option<String>,
    /// Display strings of the task-name columns, in column order.
    pub fields: Vec<String>,
    /// Display strings of the extra label-panel columns.
    pub extra: Vec<String>,
    /// Tooltip-only values; carried for hosts, never drawn.
    pub tooltip: Vec<String>,
    pub selection: SelectionHandle,
}

impl Task {
    #[must_use]
    pub fn new(id: impl Into<String>, parent: impl Into<String>, source_row: usize) -> Self {
        Self {
            id: id.into(),
            parent: parent.into(),
            start: None,
            end: None,
            secondary_start: None,
            secondary_end: None,
            completion: None,
            duration: None,
            predecessor: None,
            legend: None,
            fields: Vec::new(),
            extra: Vec::new(),
            tooltip: Vec::new(),
            selection: SelectionHandle::new(source_row),
        }
    }

    #[must_use]
    pub fn with_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start = Some(datetime_to_millis(start));
        self.end = Some(datetime_to_millis(end));
        self
    }

    #[must_use]
    pub fn with_range_millis(mut self, start: Option<f64>, end: Option<f64>) -> Self {
        self.start = start.filter(|value| value.is_finite());
        self.end = end.filter(|value| value.is_finite());
        self
    }

    #[must_use]
    pub fn with_secondary_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.secondary_start = Some(datetime_to_millis(start));
        self.secondary_end = Some(datetime_to_millis(end));
        self
    }

    /// Stores a raw completion value; values above 1 are read as percents.
    #[must_use]
    pub fn with_completion(mut self, raw: f64) -> Self {
        self.completion = normalize_completion(raw);
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration.is_finite().then_some(duration);
        self
    }

    #[must_use]
    pub fn with_predecessor(mut self, predecessor: impl Into<String>) -> Self {
        self.predecessor = Some(predecessor.into());
        self
    }

    #[must_use]
    pub fn with_legend(mut self, legend: impl Into<String>) -> Self {
        self.legend = Some(legend.into());
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn with_extra(mut self, extra: Vec<String>) -> Self {
        self.extra = extra;
        self
    }

    /// Start and end when both are present and finite.
    #[must_use]
    pub fn placed_range(&self) -> Option<(f64, f64)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start.is_finite() && end.is_finite() => Some((start, end)),
            _ => None,
        }
    }

    #[must_use]
    pub fn placed_secondary_range(&self) -> Option<(f64, f64)> {
        match (self.secondary_start, self.secondary_end) {
            (Some(start), Some(end)) if start.is_finite() && end.is_finite() => Some((start, end)),
            _ => None,
        }
    }
}
