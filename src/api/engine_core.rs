use crate::core::{
    BaseTimeDomain, DisplayFormat, Granularity, RowModel, Task, TransformEngine, Viewport,
};
use crate::extensions::GanttPlugin;
use crate::interaction::InteractionState;

use super::invalidation::InvalidationMask;
use super::{
    ChartLayout, ColorAssignments, ColorResolver, ColumnHeaders, GanttEngineConfig, PersistRequest,
    PersistedProperties, ViewState,
};

/// Cached data model: tasks from the last data-bound update plus
/// everything derived from them.
pub(super) struct GanttModel {
    pub(super) viewport: Viewport,
    pub(super) tasks: Vec<Task>,
    pub(super) columns: ColumnHeaders,
    pub(super) rows: RowModel,
    pub(super) base: Option<BaseTimeDomain>,
    pub(super) transform: Option<TransformEngine>,
    pub(super) layout: Option<ChartLayout>,
    pub(super) assignments: ColorAssignments,
    pub(super) colors: ColorResolver,
    pub(super) today_ms: f64,
    pub(super) data_revision: u64,
}

/// Runtime orchestration state grouped separately from model and view.
pub(super) struct GanttRuntimeState {
    pub(super) plugins: Vec<Box<dyn GanttPlugin>>,
    pub(super) pending_invalidation: InvalidationMask,
    pub(super) pending_format: Option<DisplayFormat>,
    pub(super) last_granularity: Option<Granularity>,
    pub(super) persisted: PersistedProperties,
    pub(super) persist_queue: Vec<PersistRequest>,
}

/// Internal engine core state used by the public facade (`GanttEngine`).
pub(super) struct EngineCore {
    pub(super) config: GanttEngineConfig,
    pub(super) model: GanttModel,
    pub(super) view: ViewState,
    pub(super) interaction: InteractionState,
    pub(super) runtime: GanttRuntimeState,
}
