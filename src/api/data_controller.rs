use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{
    BaseTimeDomain, Granularity, ResetReason, RowBandScale, RowModel, TransformEngine, Viewport,
    build_rows, datetime_to_millis,
};
use crate::error::{GanttError, GanttResult};
use crate::render::Renderer;

use super::invalidation::InvalidationTopic;
use super::layout::LayoutNeeds;
use super::persistence::SELECTED_FORMAT_KEY;
use super::{
    ChartLayout, ColorAssignments, ColorResolver, GanttDataSet, GanttEngine, PluginEvent,
    ScrollOffset, parse_tasks,
};

/// One host-triggered refresh.
///
/// `data: None` re-renders the cached task set for the new viewport;
/// `Some` replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct GanttUpdate {
    pub viewport: Viewport,
    pub data: Option<GanttDataSet>,
    pub colors: Option<ColorAssignments>,
    pub persisted: Option<IndexMap<String, String>>,
    pub today: Option<DateTime<Utc>>,
}

impl GanttUpdate {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            data: None,
            colors: None,
            persisted: None,
            today: None,
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: GanttDataSet) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: ColorAssignments) -> Self {
        self.colors = Some(colors);
        self
    }

    #[must_use]
    pub fn with_persisted(mut self, persisted: IndexMap<String, String>) -> Self {
        self.persisted = Some(persisted);
        self
    }

    #[must_use]
    pub fn with_today(mut self, today: DateTime<Utc>) -> Self {
        self.today = Some(today);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderStatus {
    Rendered,
    Placeholder,
    Failed { reason: String },
}

/// What one `update` call did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateOutcome {
    pub status: RenderStatus,
    pub transform_reset: Option<ResetReason>,
    pub visible_rows: usize,
    pub granularity: Option<Granularity>,
}

impl<R: Renderer> GanttEngine<R> {
    /// Runs the full refresh pipeline. Never fails: every problem is
    /// logged and reported through the returned status.
    pub fn update(&mut self, update: GanttUpdate) -> UpdateOutcome {
        let GanttUpdate {
            viewport,
            data,
            colors,
            persisted,
            today,
        } = update;

        if !viewport.is_valid() {
            warn!(
                width = viewport.width,
                height = viewport.height,
                "invalid viewport, falling back to identity view"
            );
            self.fall_back_to_identity();
            return self.outcome(
                RenderStatus::Failed {
                    reason: GanttError::InvalidViewport {
                        width: viewport.width,
                        height: viewport.height,
                    }
                    .to_string(),
                },
                None,
            );
        }
        if viewport != self.core.model.viewport {
            self.core.model.viewport = viewport;
            self.invalidate_topic(InvalidationTopic::Viewport);
        }
        self.core.model.today_ms = datetime_to_millis(today.unwrap_or_else(Utc::now));
        if let Some(colors) = colors {
            self.core.model.assignments = colors;
            self.invalidate_topic(InvalidationTopic::Style);
        }
        if let Some(values) = persisted {
            self.apply_persisted(&values);
        }
        if let Some(data) = data {
            self.replace_tasks(&data);
        }

        let buffer_days = self.core.config.base_domain_buffer_days;
        let Some(base) = BaseTimeDomain::from_tasks(&self.core.model.tasks, buffer_days) else {
            return self.show_placeholder();
        };

        self.rebuild_rows();
        self.core.model.colors = ColorResolver::new(
            &self.core.model.tasks,
            self.core.model.assignments.clone(),
            self.core.config.theme.palette.clone(),
        );
        let layout = match self.resolve_layout() {
            Ok(layout) => layout,
            Err(err) => {
                warn!(error = %err, "layout failed, falling back to identity view");
                self.fall_back_to_identity();
                self.core.model.layout = None;
                return self.outcome(
                    RenderStatus::Failed {
                        reason: err.to_string(),
                    },
                    None,
                );
            }
        };

        let mut engine = match self.prepare_transform_engine(base, layout.chart_width) {
            Ok(engine) => engine,
            Err(err) => {
                warn!(error = %err, "time scale setup failed, falling back to identity view");
                self.fall_back_to_identity();
                self.core.model.layout = None;
                return self.outcome(
                    RenderStatus::Failed {
                        reason: err.to_string(),
                    },
                    None,
                );
            }
        };
        let validation = engine.reset_if_out_of_bounds(
            base.data_domain(),
            self.core.config.reset_min_overlap_ratio,
        );
        self.core.model.base = Some(base);
        self.core.model.transform = Some(engine);
        self.core.model.layout = Some(layout);

        if let Some(reason) = validation.reset {
            warn!(?reason, "stale transform after data refresh, reset to identity");
            self.core.interaction.cancel_animation();
            self.core.view.scroll = ScrollOffset::ORIGIN;
            self.emit_plugin_event(PluginEvent::TransformReset);
        }
        if let Some(format) = self.core.runtime.pending_format.take() {
            if let Err(err) = self.apply_format(format) {
                warn!(error = %err, %format, "pending display format not applied");
                self.adopt_landed_format();
            }
        }
        self.commit_transform();
        self.clamp_scroll();
        self.invalidate_topic(InvalidationTopic::Data);

        let status = match self.render() {
            Ok(()) => RenderStatus::Rendered,
            Err(err) => {
                warn!(error = %err, "renderer failed during update");
                RenderStatus::Failed {
                    reason: err.to_string(),
                }
            }
        };
        debug!(
            tasks = self.core.model.tasks.len(),
            visible_rows = self.core.model.rows.len(),
            revision = self.core.model.data_revision,
            "data refresh"
        );
        self.emit_plugin_event(PluginEvent::DataRefreshed {
            task_count: self.core.model.tasks.len(),
            row_count: self.core.model.rows.len(),
        });
        self.outcome(status, validation.reset)
    }

    /// Re-resolves the layout after a theme change; the transform is kept.
    pub(super) fn refresh_layout_after_style_change(&mut self) {
        if self.core.model.tasks.is_empty() || self.core.model.transform.is_none() {
            return;
        }
        self.core.model.colors = ColorResolver::new(
            &self.core.model.tasks,
            self.core.model.assignments.clone(),
            self.core.config.theme.palette.clone(),
        );
        let resized = self.resolve_layout().and_then(|layout| {
            if let Some(engine) = self.core.model.transform.as_mut() {
                engine.set_inner_width(layout.chart_width)?;
            }
            Ok(layout)
        });
        match resized {
            Ok(layout) => {
                self.core.model.layout = Some(layout);
                self.clamp_scroll();
            }
            Err(err) => {
                warn!(error = %err, "layout failed after style change");
                self.core.model.layout = None;
            }
        }
        self.invalidate_topic(InvalidationTopic::Style);
    }

    pub(super) fn resolve_layout(&self) -> GanttResult<ChartLayout> {
        let model = &self.core.model;
        let needs = LayoutNeeds {
            task_columns: model
                .tasks
                .iter()
                .map(|task| task.fields.len())
                .max()
                .unwrap_or(1),
            extra_columns: model
                .tasks
                .iter()
                .map(|task| task.extra.len())
                .max()
                .unwrap_or(0),
            durations: model.rows.has_durations(&model.tasks),
            legend: model.colors.has_legend(),
        };
        ChartLayout::resolve(model.viewport, &self.core.config.theme, &model.columns, needs)
    }

    pub(super) fn rebuild_rows(&mut self) {
        let (rows, expansion) = build_rows(&self.core.model.tasks, &self.core.view.expansion);
        self.core.model.rows = rows;
        self.core.view.expansion = expansion;
        self.invalidate_topic(InvalidationTopic::Rows);
    }

    pub(super) fn clamp_scroll(&mut self) {
        let Some(layout) = self.core.model.layout.as_ref() else {
            return;
        };
        let content = RowBandScale::new(&self.core.model.rows, self.core.config.theme.row_height)
            .map_or(0.0, |bands| bands.total_height());
        self.core.view.scroll = self.core.view.scroll.clamped(layout.max_scroll_top(content));
    }

    /// Points the selected format at the granularity currently drawn.
    fn adopt_landed_format(&mut self) {
        let Some(granularity) = self.granularity() else {
            return;
        };
        let format = granularity.display_format();
        self.core.view.selected_format = format;
        self.queue_persist(SELECTED_FORMAT_KEY, format.as_str());
    }

    fn replace_tasks(&mut self, data: &GanttDataSet) {
        self.core.model.columns = data.columns.clone();
        self.core.model.tasks = parse_tasks(data);
        self.core.model.data_revision += 1;
        if let Some(selection) = self.core.view.selection {
            let still_present = self
                .core
                .model
                .tasks
                .iter()
                .any(|task| task.selection == selection);
            if !still_present {
                self.core.view.selection = None;
            }
        }
        self.invalidate_topic(InvalidationTopic::Data);
    }

    /// Reuses the cached engine when possible so the visible dates survive
    /// a refresh; a fresh engine restores the transform from the view.
    fn prepare_transform_engine(
        &mut self,
        base: BaseTimeDomain,
        chart_width: f64,
    ) -> GanttResult<TransformEngine> {
        if let Some(mut engine) = self.core.model.transform.take() {
            if engine.base_domain() != base.base_domain() {
                engine.rebase(base.base_domain(), chart_width)?;
            } else if engine.inner_width() != chart_width {
                engine.set_inner_width(chart_width)?;
            }
            return Ok(engine);
        }

        let mut engine = TransformEngine::new(
            base.base_domain(),
            chart_width,
            self.core.config.zoom_limits,
        )?;
        let saved = self.core.view.transform;
        if !saved.is_identity() {
            if let Err(err) = engine.apply_gesture(saved) {
                warn!(error = %err, "saved transform not restorable, using identity");
                engine.reset();
            }
        }
        Ok(engine)
    }

    fn show_placeholder(&mut self) -> UpdateOutcome {
        debug!(tasks = self.core.model.tasks.len(), "no usable task dates, placeholder");
        self.core.model.rows = RowModel::default();
        self.core.model.base = None;
        self.core.model.transform = None;
        self.core.model.layout = None;
        self.invalidate_topic(InvalidationTopic::Data);
        let status = match self.render() {
            Ok(()) => RenderStatus::Placeholder,
            Err(err) => {
                warn!(error = %err, "renderer failed drawing placeholder");
                RenderStatus::Failed {
                    reason: err.to_string(),
                }
            }
        };
        self.emit_plugin_event(PluginEvent::DataRefreshed {
            task_count: self.core.model.tasks.len(),
            row_count: 0,
        });
        self.outcome(status, None)
    }

    fn fall_back_to_identity(&mut self) {
        self.core.interaction.cancel_animation();
        self.core.view = std::mem::take(&mut self.core.view).reset_viewport();
        if let Some(engine) = self.core.model.transform.as_mut() {
            engine.reset();
        }
    }

    fn outcome(&self, status: RenderStatus, transform_reset: Option<ResetReason>) -> UpdateOutcome {
        UpdateOutcome {
            status,
            transform_reset,
            visible_rows: self.core.model.rows.len(),
            granularity: self.granularity(),
        }
    }
}
