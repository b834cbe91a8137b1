use crate::core::{
    BaseTimeDomain, Granularity, RowModel, Task, TimeDomain, TimeScale, Viewport, ZoomTransform,
};
use crate::error::GanttResult;
use crate::interaction::InteractionMode;
use crate::render::Renderer;

use super::{
    ChartLayout, GanttEngineConfig, GanttTheme, ViewState, engine_core::EngineCore,
    render_coordinator::RenderCoordinator,
};

/// Main orchestration facade consumed by host applications.
///
/// `GanttEngine` owns the cached task set, the time scale and zoom
/// transform, the view state, and the renderer every frame is sent to.
pub struct GanttEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) core: EngineCore,
}

impl<R: Renderer> GanttEngine<R> {
    pub fn render(&mut self) -> GanttResult<()> {
        RenderCoordinator::render(self)
    }

    /// Renders only when something changed since the last frame.
    ///
    /// Returns `true` when a frame was produced.
    pub fn render_if_needed(&mut self) -> GanttResult<bool> {
        RenderCoordinator::render_if_needed(self)
    }

    #[must_use]
    pub fn config(&self) -> &GanttEngineConfig {
        &self.core.config
    }

    #[must_use]
    pub fn theme(&self) -> &GanttTheme {
        &self.core.config.theme
    }

    pub fn set_theme(&mut self, theme: GanttTheme) -> GanttResult<()> {
        self.core.config.theme = theme.validate()?;
        self.refresh_layout_after_style_change();
        self.invalidate();
        Ok(())
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.model.viewport
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.core.model.tasks
    }

    #[must_use]
    pub fn rows(&self) -> &RowModel {
        &self.core.model.rows
    }

    #[must_use]
    pub fn layout(&self) -> Option<&ChartLayout> {
        self.core.model.layout.as_ref()
    }

    /// Current view state, transform included.
    #[must_use]
    pub fn view_state(&self) -> ViewState {
        self.core.view.clone()
    }

    #[must_use]
    pub fn transform(&self) -> ZoomTransform {
        self.core.view.transform
    }

    #[must_use]
    pub fn base_domain(&self) -> Option<BaseTimeDomain> {
        self.core.model.base
    }

    #[must_use]
    pub fn original_scale(&self) -> Option<TimeScale> {
        self.core
            .model
            .transform
            .as_ref()
            .map(|engine| engine.original_scale())
    }

    #[must_use]
    pub fn effective_scale(&self) -> Option<TimeScale> {
        self.core
            .model
            .transform
            .as_ref()
            .map(|engine| engine.effective_scale())
    }

    #[must_use]
    pub fn visible_domain(&self) -> Option<TimeDomain> {
        self.core
            .model
            .transform
            .as_ref()
            .map(|engine| engine.visible_domain())
    }

    /// Granularity implied by the current pixel density.
    #[must_use]
    pub fn granularity(&self) -> Option<Granularity> {
        let thresholds = self.core.config.granularity_thresholds;
        self.core
            .model
            .transform
            .as_ref()
            .map(|engine| engine.granularity(thresholds))
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.core.interaction.mode()
    }

    #[must_use]
    pub fn data_revision(&self) -> u64 {
        self.core.model.data_revision
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
