use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::completion::group_completion;
use crate::core::task::Task;

/// Unique key of a visual row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RowKey {
    Group { parent: String },
    Task { task: String, parent: String },
}

impl RowKey {
    #[must_use]
    pub fn group(parent: impl Into<String>) -> Self {
        Self::Group {
            parent: parent.into(),
        }
    }

    #[must_use]
    pub fn task(task: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::Task {
            task: task.into(),
            parent: parent.into(),
        }
    }

    #[must_use]
    pub fn parent(&self) -> &str {
        match self {
            Self::Group { parent } | Self::Task { parent, .. } => parent,
        }
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group { parent } => write!(f, "group:{parent}"),
            Self::Task { task, parent } => write!(f, "task:{parent}/{task}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VisualRow {
    Group {
        key: RowKey,
        expanded: bool,
        /// Sum of the numeric child durations.
        duration: f64,
        child_count: usize,
    },
    Task {
        key: RowKey,
        /// Index into the task slice the rows were built from.
        task: usize,
    },
}

impl VisualRow {
    #[must_use]
    pub fn key(&self) -> &RowKey {
        match self {
            Self::Group { key, .. } | Self::Task { key, .. } => key,
        }
    }

    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group { .. })
    }

    #[must_use]
    pub fn parent(&self) -> &str {
        self.key().parent()
    }
}

/// Expand/collapse flag per parent, in first-seen order.
///
/// Parents with no stored flag are expanded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExpansionState {
    flags: IndexMap<String, bool>,
}

impl ExpansionState {
    #[must_use]
    pub fn is_expanded(&self, parent: &str) -> bool {
        self.flags.get(parent).copied().unwrap_or(true)
    }

    pub fn set(&mut self, parent: impl Into<String>, expanded: bool) {
        self.flags.insert(parent.into(), expanded);
    }

    /// Flips the flag and returns the new value.
    pub fn toggle(&mut self, parent: &str) -> bool {
        let next = !self.is_expanded(parent);
        self.set(parent.to_owned(), next);
        next
    }

    pub fn set_all(&mut self, expanded: bool) {
        for flag in self.flags.values_mut() {
            *flag = expanded;
        }
    }

    /// All known parents expanded; vacuously true with no parents.
    #[must_use]
    pub fn all_expanded(&self) -> bool {
        self.flags.values().all(|flag| *flag)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(parent, flag)| (parent.as_str(), *flag))
    }
}

/// Aggregate extent of every child of a group, collapsed or not.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupRange {
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub secondary_start: Option<f64>,
    pub secondary_end: Option<f64>,
    /// Mean normalized child completion.
    pub completion: f64,
}

impl GroupRange {
    #[must_use]
    pub fn placed_range(self) -> Option<(f64, f64)> {
        Some((self.start?, self.end?))
    }

    #[must_use]
    pub fn placed_secondary_range(self) -> Option<(f64, f64)> {
        Some((self.secondary_start?, self.secondary_end?))
    }
}

/// Output of one row-build pass over the task set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RowModel {
    pub rows: Vec<VisualRow>,
    pub group_ranges: IndexMap<String, GroupRange>,
}

impl RowModel {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn position_of(&self, key: &RowKey) -> Option<usize> {
        self.rows.iter().position(|row| row.key() == key)
    }

    #[must_use]
    pub fn group_range(&self, parent: &str) -> Option<GroupRange> {
        self.group_ranges.get(parent).copied()
    }

    /// Any task in the set carries a numeric duration.
    #[must_use]
    pub fn has_durations(&self, tasks: &[Task]) -> bool {
        tasks.iter().any(|task| task.duration.is_some())
    }
}

/// Groups tasks by parent in first-seen order and flattens them into rows.
///
/// Each group contributes its header and, when expanded, every child.
/// Group ranges are recomputed over all children on every pass. Every
/// parent seen in `tasks` gets an explicit flag in the returned state.
#[must_use]
pub fn build_rows(tasks: &[Task], expansion: &ExpansionState) -> (RowModel, ExpansionState) {
    let mut groups: IndexMap<&str, Vec<usize>> = IndexMap::new();
    for (index, task) in tasks.iter().enumerate() {
        groups.entry(task.parent.as_str()).or_default().push(index);
    }

    let mut next_expansion = expansion.clone();
    let mut model = RowModel {
        rows: Vec::with_capacity(tasks.len() + groups.len()),
        group_ranges: IndexMap::with_capacity(groups.len()),
    };

    for (parent, children) in &groups {
        let expanded = expansion.is_expanded(parent);
        next_expansion.set(*parent, expanded);

        let duration = children
            .iter()
            .filter_map(|index| tasks[*index].duration)
            .filter(|value| value.is_finite())
            .sum();
        model.rows.push(VisualRow::Group {
            key: RowKey::group(*parent),
            expanded,
            duration,
            child_count: children.len(),
        });
        model
            .group_ranges
            .insert((*parent).to_owned(), group_range(tasks, children));

        if expanded {
            model
                .rows
                .extend(children.iter().map(|index| VisualRow::Task {
                    key: RowKey::task(tasks[*index].id.clone(), *parent),
                    task: *index,
                }));
        }
    }

    (model, next_expansion)
}

fn group_range(tasks: &[Task], children: &[usize]) -> GroupRange {
    let children = || children.iter().map(|index| &tasks[*index]);
    GroupRange {
        start: min_present(children().map(|task| task.start)),
        end: max_present(children().map(|task| task.end)),
        secondary_start: min_present(children().map(|task| task.secondary_start)),
        secondary_end: max_present(children().map(|task| task.secondary_end)),
        completion: group_completion(children().map(|task| task.completion)),
    }
}

fn min_present(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    values.flatten().filter(|value| value.is_finite()).reduce(f64::min)
}

fn max_present(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    values.flatten().filter(|value| value.is_finite()).reduce(f64::max)
}
