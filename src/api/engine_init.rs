use tracing::debug;

use crate::core::{RowModel, datetime_to_millis};
use crate::error::GanttResult;
use crate::interaction::InteractionState;
use crate::render::Renderer;

use super::invalidation::{InvalidationMask, InvalidationTopic};
use super::{
    ColorAssignments, ColorResolver, ColumnHeaders, GanttEngine, GanttEngineConfig,
    PersistedProperties, ViewState,
    engine_core::{EngineCore, GanttModel, GanttRuntimeState},
};

impl<R: Renderer> GanttEngine<R> {
    /// Creates an engine with no data; the first frame is the placeholder.
    pub fn new(renderer: R, config: GanttEngineConfig) -> GanttResult<Self> {
        let config = config.validate()?;
        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            initial_format = %config.initial_format,
            "gantt engine init"
        );

        let palette = config.theme.palette.clone();
        let model = GanttModel {
            viewport: config.viewport,
            tasks: Vec::new(),
            columns: ColumnHeaders::default(),
            rows: RowModel::default(),
            base: None,
            transform: None,
            layout: None,
            assignments: ColorAssignments::default(),
            colors: ColorResolver::new(&[], ColorAssignments::default(), palette),
            today_ms: datetime_to_millis(chrono::Utc::now()),
            data_revision: 0,
        };

        Ok(Self {
            renderer,
            core: EngineCore {
                view: ViewState::with_format(config.initial_format),
                runtime: GanttRuntimeState {
                    plugins: Vec::new(),
                    pending_invalidation: InvalidationMask::empty().with(InvalidationTopic::General),
                    pending_format: Some(config.initial_format),
                    last_granularity: None,
                    persisted: PersistedProperties::default(),
                    persist_queue: Vec::new(),
                },
                config,
                model,
                interaction: InteractionState::default(),
            },
        })
    }
}
