use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::core::{TimeScale, TransformEngine, ZoomTransform, datetime_to_millis, nearest_anchor};
use crate::error::{GanttError, GanttResult};
use crate::interaction::{InteractionMode, ZoomAnimation};
use crate::render::Renderer;

use super::invalidation::InvalidationTopic;
use super::persistence::SELECTED_FORMAT_KEY;
use super::{GanttEngine, PluginEvent, ScrollOffset};

impl<R: Renderer> GanttEngine<R> {
    /// Starts direct manipulation; a running animation is dropped.
    pub fn begin_gesture(&mut self) {
        if self.core.interaction.begin_gesture(self.core.view.transform) {
            trace!("gesture cancelled zoom animation");
        }
        self.emit_plugin_event(PluginEvent::GestureStarted);
    }

    /// Adopts one raw gesture transform and returns the new effective scale.
    ///
    /// The original scale is never touched; only the transform moves.
    pub fn apply_gesture(&mut self, raw: ZoomTransform) -> GanttResult<TimeScale> {
        if self.core.interaction.mode() == InteractionMode::Animating {
            self.core.interaction.cancel_animation();
        }
        let scale = self.transform_engine_mut()?.apply_gesture(raw)?;
        self.commit_transform();
        Ok(scale)
    }

    /// Ends direct manipulation and records the granularity it landed on
    /// as the selected format.
    pub fn end_gesture(&mut self) {
        self.core.interaction.end_gesture();
        if let Some(granularity) = self.granularity() {
            let format = granularity.display_format();
            if format != self.core.view.selected_format {
                debug!(%format, "gesture changed display format");
                self.core.view.selected_format = format;
            }
            self.queue_persist(SELECTED_FORMAT_KEY, format.as_str());
        }
        self.emit_plugin_event(PluginEvent::GestureEnded);
    }

    pub fn pan_by(&mut self, dx_px: f64) -> GanttResult<TimeScale> {
        if !dx_px.is_finite() {
            return Err(GanttError::InvalidData("pan delta must be finite".to_owned()));
        }
        let next = self.core.view.transform.translate_by(dx_px);
        self.apply_gesture(next)
    }

    /// Zooms by `wheel_zoom_step` per notch around a viewport x position.
    ///
    /// Positive notches zoom in.
    pub fn wheel_zoom(&mut self, notches: f64, anchor_x_px: f64) -> GanttResult<TimeScale> {
        if !notches.is_finite() || !anchor_x_px.is_finite() {
            return Err(GanttError::InvalidData(
                "wheel zoom notches and anchor must be finite".to_owned(),
            ));
        }
        let chart_left = self.core.model.layout.as_ref().map_or(0.0, |layout| layout.chart_left);
        let anchor = anchor_x_px - chart_left;
        let limits = self.transform_engine_mut()?.limits();
        let current = self.core.view.transform;
        let k = limits.clamp(current.k * self.core.config.wheel_zoom_step.powf(notches));
        self.apply_gesture(current.scale_to(k, anchor))
    }

    pub fn scroll_to(&mut self, top: f64) -> GanttResult<()> {
        if !top.is_finite() {
            return Err(GanttError::InvalidData("scroll offset must be finite".to_owned()));
        }
        let previous = self.core.view.scroll;
        self.core.view.scroll = ScrollOffset { top };
        self.clamp_scroll();
        if self.core.view.scroll != previous {
            self.invalidate_topic(InvalidationTopic::Viewport);
        }
        Ok(())
    }

    pub fn scroll_by(&mut self, dy: f64) -> GanttResult<()> {
        self.scroll_to(self.core.view.scroll.top + dy)
    }

    #[must_use]
    pub fn scroll_offset(&self) -> ScrollOffset {
        self.core.view.scroll
    }

    /// Fits `[start, end]` to the chart width, anchored on the task start
    /// nearest the current left edge.
    pub fn zoom_to_range(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> GanttResult<ZoomTransform> {
        self.zoom_to_range_millis(datetime_to_millis(start), datetime_to_millis(end))
    }

    pub fn zoom_to_range_millis(&mut self, start: f64, end: f64) -> GanttResult<ZoomTransform> {
        let anchor = self.anchor_near_left_edge().unwrap_or(start);
        let offset = self.core.config.zoom_anchor_offset_px;
        self.core.interaction.cancel_animation();
        let transform = self
            .transform_engine_mut()?
            .zoom_to_range(start, end, anchor, offset)?;
        self.commit_transform();
        Ok(transform)
    }

    /// Starts an animated return to the identity transform.
    ///
    /// Returns `false` when already at identity.
    pub fn reset_zoom_animated(&mut self) -> GanttResult<bool> {
        self.transform_engine_mut()?;
        let from = self.core.view.transform;
        if from.is_identity() {
            return Ok(false);
        }
        let duration = self.core.config.reset_animation_ms;
        self.core
            .interaction
            .start_animation(ZoomAnimation::new(from, ZoomTransform::IDENTITY, duration));
        if duration <= 0.0 {
            self.advance_animation(0.0)?;
        }
        Ok(true)
    }

    /// Steps the running animation by `delta_ms` and applies the
    /// transform at that instant.
    ///
    /// Returns `true` while the animation is still running.
    pub fn advance_animation(&mut self, delta_ms: f64) -> GanttResult<bool> {
        let Some(transform) = self.core.interaction.step_animation(delta_ms) else {
            return Ok(false);
        };
        self.transform_engine_mut()?.apply_gesture(transform)?;
        self.commit_transform();
        Ok(self.core.interaction.mode() == InteractionMode::Animating)
    }

    /// Copies the engine transform into the view state and reports every
    /// observable change.
    pub(super) fn commit_transform(&mut self) {
        let thresholds = self.core.config.granularity_thresholds;
        let Some((transform, granularity)) = self
            .core
            .model
            .transform
            .as_ref()
            .map(|engine| (engine.transform(), engine.granularity(thresholds)))
        else {
            return;
        };

        if transform != self.core.view.transform {
            self.core.view.transform = transform;
            trace!(k = transform.k, x = transform.x, "transform changed");
            self.invalidate_topic(InvalidationTopic::Transform);
            self.emit_plugin_event(PluginEvent::TransformChanged {
                k: transform.k,
                x: transform.x,
            });
        }

        let previous = self.core.runtime.last_granularity;
        if previous != Some(granularity) {
            self.core.runtime.last_granularity = Some(granularity);
            debug!(?previous, ?granularity, "granularity changed");
            self.emit_plugin_event(PluginEvent::GranularityChanged {
                from: previous,
                to: granularity,
            });
        }
    }

    pub(super) fn transform_engine_mut(&mut self) -> GanttResult<&mut TransformEngine> {
        self.core
            .model
            .transform
            .as_mut()
            .ok_or(GanttError::NoUsableData)
    }

    pub(super) fn anchor_near_left_edge(&self) -> Option<f64> {
        let engine = self.core.model.transform.as_ref()?;
        let left_edge = engine.visible_domain().start;
        nearest_anchor(
            self.core.model.tasks.iter().filter_map(|task| task.start),
            left_edge,
        )
    }
}
