use crate::error::{GanttError, GanttResult};
use crate::render::Renderer;

use super::{EngineSnapshot, FrameSummary, GanttEngine, RenderStatus};

impl<R: Renderer> GanttEngine<R> {
    /// Builds a deterministic snapshot useful for regression tests.
    pub fn snapshot(&self) -> GanttResult<EngineSnapshot> {
        let model = &self.core.model;
        let frame = self.build_render_frame()?;
        let status = if self.shows_placeholder() {
            RenderStatus::Placeholder
        } else {
            RenderStatus::Rendered
        };
        Ok(EngineSnapshot {
            viewport: model.viewport,
            data_revision: model.data_revision,
            task_count: model.tasks.len(),
            visible_rows: model.rows.len(),
            data_domain: model.base.map(|base| base.data_domain().as_tuple()),
            base_domain: model.base.map(|base| base.base_domain().as_tuple()),
            original_range_px: self.original_scale().map(|scale| scale.range()),
            visible_domain: self.visible_domain().map(|domain| domain.as_tuple()),
            transform: self.core.view.transform,
            granularity: self.granularity(),
            selected_format: self.core.view.selected_format,
            scroll: self.core.view.scroll,
            interaction_mode: self.core.interaction.mode(),
            expanded_groups: self
                .core
                .view
                .expansion
                .iter()
                .map(|(parent, expanded)| (parent.to_owned(), expanded))
                .collect(),
            frame: FrameSummary {
                status,
                lines: frame.lines.len(),
                rects: frame.rects.len(),
                paths: frame.paths.len(),
                texts: frame.texts.len(),
                gradients: frame.gradients.len(),
            },
        })
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> GanttResult<String> {
        let snapshot = self.snapshot()?;
        serde_json::to_string_pretty(&snapshot)
            .map_err(|e| GanttError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
