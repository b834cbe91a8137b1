mod axis_label_format;
mod axis_layer_builder;
mod background_layer_builder;
mod bar_layer_builder;
mod bar_projection;
mod color_resolver;
mod data_controller;
mod data_source;
mod dependency_layer_builder;
mod engine;
mod engine_config;
mod engine_core;
mod engine_init;
mod engine_snapshot;
mod format_controller;
mod invalidation;
mod invalidation_render_gate;
mod layout;
mod layout_helpers;
mod legend_layer_builder;
mod persistence;
mod placeholder;
mod plugin_dispatch;
mod plugin_registry;
mod redraw_context;
mod render_coordinator;
mod render_cycle_finalizer;
mod render_frame_builder;
mod row_controller;
mod row_label_layer_builder;
mod snapshot_controller;
mod theme;
mod transform_controller;
mod view_state;

pub use axis_label_format::{
    PANEL_DATE_PATTERN, TickPlan, bottom_tick_plan, format_duration_label, format_duration_text,
    format_duration_value, format_panel_date, tick_instants, top_band_plan,
};
pub use bar_layer_builder::{bar_gradient_id, group_bar_path};
pub use color_resolver::{ColorAssignments, ColorResolver};
pub use data_controller::{GanttUpdate, RenderStatus, UpdateOutcome};
pub use data_source::{
    CellValue, ColumnHeaders, FIELD_SEPARATOR, GanttDataSet, SourceRow, UNGROUPED_PARENT,
    parse_date_text, parse_tasks,
};
pub use dependency_layer_builder::{ConnectorEnd, arrow_head, elbow_path};
pub use engine::GanttEngine;
pub use engine_config::GanttEngineConfig;
pub use engine_snapshot::{EngineSnapshot, FrameSummary};
pub use invalidation::{InvalidationMask, InvalidationTopic};
pub use layout::{ChartLayout, ColumnKind, ColumnLayout, LayoutNeeds};
pub use persistence::{
    PersistRequest, PersistedProperties, SELECTED_FORMAT_KEY, parse_persisted_format,
};
pub use placeholder::{PLACEHOLDER_SECTIONS, PLACEHOLDER_TITLE, build_placeholder_frame};
pub use redraw_context::RedrawInput;
pub use render_frame_builder::build_layered_frame;
pub use row_label_layer_builder::{COLLAPSED_GLYPH, EXPANDED_GLYPH, row_cell_text};
pub use theme::{ColumnWidths, FontStyle, GanttTheme};
pub use view_state::{ScrollOffset, ViewState};

pub use crate::extensions::PluginEvent;
