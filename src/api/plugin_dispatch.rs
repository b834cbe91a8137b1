use crate::extensions::PluginContext;
use crate::render::Renderer;

use super::{GanttEngine, PluginEvent};

impl<R: Renderer> GanttEngine<R> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        let model = &self.core.model;
        PluginContext {
            viewport: model.viewport,
            visible_domain: self.visible_domain().map(|domain| domain.as_tuple()),
            transform: self.core.view.transform,
            granularity: self.granularity(),
            selected_format: self.core.view.selected_format,
            task_count: model.tasks.len(),
            visible_row_count: model.rows.len(),
            interaction_mode: self.core.interaction.mode(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: PluginEvent) {
        if self.core.runtime.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in &mut self.core.runtime.plugins {
            plugin.on_event(&event, context);
        }
    }
}
