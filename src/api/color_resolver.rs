use indexmap::IndexMap;
use tracing::warn;

use crate::core::Task;
use crate::render::Color;

/// Host-assigned colors, keyed by legend value or parent name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorAssignments {
    pub legend: IndexMap<String, Color>,
    pub parent: IndexMap<String, Color>,
}

impl ColorAssignments {
    /// Builds assignments from hex strings, skipping unparseable entries.
    #[must_use]
    pub fn from_hex_maps(
        legend: &IndexMap<String, String>,
        parent: &IndexMap<String, String>,
    ) -> Self {
        let parse = |map: &IndexMap<String, String>| {
            map.iter()
                .filter_map(|(key, hex)| match Color::from_hex(hex) {
                    Ok(color) => Some((key.clone(), color)),
                    Err(err) => {
                        warn!(key = %key, error = %err, "ignoring color assignment");
                        None
                    }
                })
                .collect()
        };
        Self {
            legend: parse(legend),
            parent: parse(parent),
        }
    }
}

/// Resolves bar colors with one precedence order for every layer:
/// legend color, then explicit parent color, then palette by parent index.
///
/// Legend values without an explicit color take palette slots in
/// first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorResolver {
    assignments: ColorAssignments,
    palette: Vec<Color>,
    parent_order: IndexMap<String, usize>,
    legend_order: IndexMap<String, usize>,
}

impl ColorResolver {
    #[must_use]
    pub fn new(tasks: &[Task], assignments: ColorAssignments, palette: Vec<Color>) -> Self {
        let mut parent_order = IndexMap::new();
        let mut legend_order = IndexMap::new();
        for task in tasks {
            let next = parent_order.len();
            parent_order.entry(task.parent.clone()).or_insert(next);
            if let Some(legend) = &task.legend {
                let next = legend_order.len();
                legend_order.entry(legend.clone()).or_insert(next);
            }
        }
        Self {
            assignments,
            palette,
            parent_order,
            legend_order,
        }
    }

    #[must_use]
    pub fn for_task(&self, task: &Task) -> Color {
        task.legend
            .as_deref()
            .and_then(|legend| self.for_legend(legend))
            .unwrap_or_else(|| self.for_parent(&task.parent))
    }

    #[must_use]
    pub fn for_parent(&self, parent: &str) -> Color {
        if let Some(color) = self.assignments.parent.get(parent) {
            return *color;
        }
        let index = self.parent_order.get(parent).copied().unwrap_or(0);
        self.palette_color(index)
    }

    #[must_use]
    pub fn for_legend(&self, legend: &str) -> Option<Color> {
        if let Some(color) = self.assignments.legend.get(legend) {
            return Some(*color);
        }
        self.legend_order
            .get(legend)
            .map(|index| self.palette_color(*index))
    }

    /// Distinct legend values in first-seen order.
    pub fn legend_values(&self) -> impl Iterator<Item = &str> {
        self.legend_order.keys().map(String::as_str)
    }

    #[must_use]
    pub fn has_legend(&self) -> bool {
        !self.legend_order.is_empty()
    }

    fn palette_color(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return Color::BLACK;
        }
        self.palette[index % self.palette.len()]
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::{ColorAssignments, ColorResolver};
    use crate::core::Task;
    use crate::render::Color;

    fn palette() -> Vec<Color> {
        vec![Color::rgb(1.0, 0.0, 0.0), Color::rgb(0.0, 1.0, 0.0)]
    }

    #[test]
    fn legend_beats_parent_beats_palette() {
        let tasks = vec![
            Task::new("a", "P1", 0).with_legend("High"),
            Task::new("b", "P2", 1),
            Task::new("c", "P3", 2),
        ];
        let mut assignments = ColorAssignments::default();
        assignments.legend.insert("High".to_owned(), Color::BLACK);
        assignments.parent.insert("P1".to_owned(), Color::WHITE);
        assignments.parent.insert("P2".to_owned(), Color::WHITE);
        let resolver = ColorResolver::new(&tasks, assignments, palette());

        assert_eq!(resolver.for_task(&tasks[0]), Color::BLACK);
        assert_eq!(resolver.for_task(&tasks[1]), Color::WHITE);
        assert_eq!(resolver.for_task(&tasks[2]), palette()[0]);
    }

    #[test]
    fn invalid_hex_assignments_are_skipped() {
        let mut parent = IndexMap::new();
        parent.insert("P1".to_owned(), "#00ff00".to_owned());
        parent.insert("P2".to_owned(), "green-ish".to_owned());
        let assignments = ColorAssignments::from_hex_maps(&IndexMap::new(), &parent);
        assert_eq!(assignments.parent.len(), 1);
    }
}
