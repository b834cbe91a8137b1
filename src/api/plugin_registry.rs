use tracing::debug;

use crate::error::{GanttError, GanttResult};
use crate::extensions::GanttPlugin;
use crate::render::Renderer;

use super::GanttEngine;

impl<R: Renderer> GanttEngine<R> {
    /// Adds an observer. Ids must be non-blank and unique; events reach
    /// plugins in registration order.
    pub fn register_plugin(&mut self, plugin: Box<dyn GanttPlugin>) -> GanttResult<()> {
        let id = plugin.id();
        if id.trim().is_empty() {
            return Err(GanttError::InvalidData("plugin id must not be blank".to_owned()));
        }
        if self.has_plugin(id) {
            return Err(GanttError::InvalidData(format!(
                "plugin `{id}` is already registered"
            )));
        }
        debug!(plugin = id, "register plugin");
        self.core.runtime.plugins.push(plugin);
        Ok(())
    }

    /// Removes the plugin with `id`, handing it back to the caller.
    pub fn unregister_plugin(&mut self, id: &str) -> Option<Box<dyn GanttPlugin>> {
        let plugins = &mut self.core.runtime.plugins;
        let index = plugins.iter().position(|plugin| plugin.id() == id)?;
        debug!(plugin = id, "unregister plugin");
        Some(plugins.remove(index))
    }

    #[must_use]
    pub fn has_plugin(&self, id: &str) -> bool {
        self.plugin_ids().any(|known| known == id)
    }

    pub fn plugin_ids(&self) -> impl Iterator<Item = &str> {
        self.core.runtime.plugins.iter().map(|plugin| plugin.id())
    }
}
