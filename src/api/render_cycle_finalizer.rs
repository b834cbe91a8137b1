use crate::extensions::PluginEvent;
use crate::render::Renderer;

use super::GanttEngine;

pub(super) fn finalize_render_cycle<R: Renderer>(engine: &mut GanttEngine<R>) {
    engine.clear_pending_invalidation();
    engine.emit_plugin_event(PluginEvent::Rendered);
}
