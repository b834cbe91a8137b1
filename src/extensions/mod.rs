//! Observer hooks for host-side extensions.

pub mod plugins;

pub use plugins::{GanttPlugin, PluginContext, PluginEvent};
