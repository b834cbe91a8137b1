use serde::{Deserialize, Serialize};

use crate::core::{DisplayFormat, Granularity, Viewport, ZoomTransform};
use crate::interaction::InteractionMode;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    pub visible_domain: Option<(f64, f64)>,
    pub transform: ZoomTransform,
    pub granularity: Option<Granularity>,
    pub selected_format: DisplayFormat,
    pub task_count: usize,
    pub visible_row_count: usize,
    pub interaction_mode: InteractionMode,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    DataRefreshed { task_count: usize, row_count: usize },
    TransformChanged { k: f64, x: f64 },
    GranularityChanged { from: Option<Granularity>, to: Granularity },
    TransformReset,
    FormatApplied { format: DisplayFormat },
    GroupToggled { parent: String, expanded: bool },
    GestureStarted,
    GestureEnded,
    Rendered,
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins can observe events and read engine context without mutating
/// engine internals directly.
pub trait GanttPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &PluginEvent, context: PluginContext);
}
