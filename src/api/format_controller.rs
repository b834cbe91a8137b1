use tracing::debug;

use crate::core::{DisplayFormat, MILLIS_PER_DAY, ZoomTransform};
use crate::error::{GanttError, GanttResult};
use crate::render::Renderer;

use super::persistence::{SELECTED_FORMAT_KEY, parse_persisted_format};
use super::{GanttEngine, PluginEvent};

impl<R: Renderer> GanttEngine<R> {
    /// Jumps to a display format.
    ///
    /// Presets zoom to the center of their pixel-density band, anchored on
    /// the task nearest the left edge. `All` fits the whole data domain.
    /// Without data the request is kept and applied on the next refresh.
    ///
    /// A preset the zoom limits cannot reach fails with `InvalidData` and
    /// leaves the transform and the selected format untouched.
    pub fn request_format(&mut self, format: DisplayFormat) -> GanttResult<ZoomTransform> {
        if self.core.model.transform.is_none() {
            debug!(%format, "format requested before data, deferred");
            self.core.view.selected_format = format;
            self.core.runtime.pending_format = Some(format);
            self.queue_persist(SELECTED_FORMAT_KEY, format.as_str());
            return Ok(self.core.view.transform);
        }
        self.core.interaction.cancel_animation();
        let transform = self.apply_format(format)?;
        self.commit_transform();
        Ok(transform)
    }

    /// Like [`Self::request_format`] for a host string; unknown values fall
    /// back to the default format.
    pub fn request_format_str(&mut self, value: &str) -> GanttResult<ZoomTransform> {
        self.request_format(parse_persisted_format(value))
    }

    #[must_use]
    pub fn selected_format(&self) -> DisplayFormat {
        self.core.view.selected_format
    }

    pub(super) fn apply_format(&mut self, format: DisplayFormat) -> GanttResult<ZoomTransform> {
        let data = self
            .core
            .model
            .base
            .ok_or(GanttError::NoUsableData)?
            .data_domain();
        let thresholds = self.core.config.granularity_thresholds;
        let offset = self.core.config.zoom_anchor_offset_px;
        let anchor = self.anchor_near_left_edge();

        let engine = self.transform_engine_mut()?;
        let transform = match format.granularity() {
            None => engine.zoom_to_range(data.start, data.end, data.start, 0.0)?,
            Some(granularity) => {
                let k = engine.scale_for_granularity(granularity, thresholds)?;
                let span_ms = engine.inner_width()
                    / (k * engine.original_scale().pixels_per_day())
                    * MILLIS_PER_DAY;
                let start = anchor.unwrap_or(data.start);
                engine.zoom_to_range(start, start + span_ms, start, offset)?
            }
        };
        debug!(%format, k = transform.k, x = transform.x, "display format applied");

        self.core.view.selected_format = format;
        self.queue_persist(SELECTED_FORMAT_KEY, format.as_str());
        self.emit_plugin_event(PluginEvent::FormatApplied { format });
        Ok(transform)
    }
}
