use tracing::debug;

use crate::core::SelectionHandle;
use crate::error::{GanttError, GanttResult};
use crate::render::Renderer;

use super::invalidation::InvalidationTopic;
use super::{GanttEngine, PluginEvent};

impl<R: Renderer> GanttEngine<R> {
    /// Flips one group between expanded and collapsed.
    ///
    /// Returns the new expansion flag.
    pub fn toggle_group(&mut self, parent: &str) -> GanttResult<bool> {
        self.ensure_known_parent(parent)?;
        let expanded = self.core.view.expansion.toggle(parent);
        self.after_expansion_change();
        self.emit_plugin_event(PluginEvent::GroupToggled {
            parent: parent.to_owned(),
            expanded,
        });
        Ok(expanded)
    }

    pub fn set_group_expanded(&mut self, parent: &str, expanded: bool) -> GanttResult<()> {
        self.ensure_known_parent(parent)?;
        if self.core.view.expansion.is_expanded(parent) == expanded {
            return Ok(());
        }
        self.core.view.expansion.set(parent, expanded);
        self.after_expansion_change();
        self.emit_plugin_event(PluginEvent::GroupToggled {
            parent: parent.to_owned(),
            expanded,
        });
        Ok(())
    }

    /// Expands or collapses every known group at once.
    pub fn set_all_expanded(&mut self, expanded: bool) {
        debug!(expanded, groups = self.core.view.expansion.len(), "set all groups");
        self.core.view.expansion.set_all(expanded);
        self.after_expansion_change();
    }

    #[must_use]
    pub fn all_expanded(&self) -> bool {
        self.core.view.expansion.all_expanded()
    }

    #[must_use]
    pub fn is_group_expanded(&self, parent: &str) -> bool {
        self.core.view.expansion.is_expanded(parent)
    }

    /// Highlights one task; every other bar is dimmed. `None` clears it.
    pub fn set_selection(&mut self, selection: Option<SelectionHandle>) -> GanttResult<()> {
        if let Some(handle) = selection {
            let known = self
                .core
                .model
                .tasks
                .iter()
                .any(|task| task.selection == handle);
            if !known {
                return Err(GanttError::InvalidData(format!(
                    "no task for selection handle {}",
                    handle.source_row()
                )));
            }
        }
        if self.core.view.selection != selection {
            self.core.view.selection = selection;
            self.invalidate_topic(InvalidationTopic::Selection);
        }
        Ok(())
    }

    #[must_use]
    pub fn selection(&self) -> Option<SelectionHandle> {
        self.core.view.selection
    }

    fn ensure_known_parent(&self, parent: &str) -> GanttResult<()> {
        if self.core.model.rows.group_ranges.contains_key(parent) {
            Ok(())
        } else {
            Err(GanttError::InvalidData(format!("unknown group `{parent}`")))
        }
    }

    fn after_expansion_change(&mut self) {
        self.rebuild_rows();
        self.clamp_scroll();
    }
}
