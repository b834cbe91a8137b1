use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::base_domain::TimeDomain;
use crate::core::granularity::{Granularity, GranularityThresholds};
use crate::core::time_scale::TimeScale;
use crate::core::zoom_transform::{ZoomLimits, ZoomTransform};
use crate::error::{GanttError, GanttResult};

/// Why a transform was rejected by bounds validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetReason {
    NonFinite,
    OutsideBaseDomain,
    InsufficientOverlap,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformValidation {
    pub transform: ZoomTransform,
    pub reset: Option<ResetReason>,
}

impl TransformValidation {
    #[must_use]
    pub fn was_reset(self) -> bool {
        self.reset.is_some()
    }
}

/// Owns the original time scale and the zoom transform over it.
///
/// The original scale changes only through [`TransformEngine::rebase`] and
/// [`TransformEngine::set_inner_width`]; gestures only move the transform.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformEngine {
    base: TimeDomain,
    original: TimeScale,
    transform: ZoomTransform,
    limits: ZoomLimits,
}

impl TransformEngine {
    pub fn new(base: TimeDomain, inner_width_px: f64, limits: ZoomLimits) -> GanttResult<Self> {
        let limits = limits.validate()?;
        let original = original_scale(base, inner_width_px)?;
        Ok(Self {
            base,
            original,
            transform: ZoomTransform::IDENTITY,
            limits,
        })
    }

    #[must_use]
    pub fn base_domain(&self) -> TimeDomain {
        self.base
    }

    #[must_use]
    pub fn original_scale(&self) -> TimeScale {
        self.original
    }

    #[must_use]
    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    #[must_use]
    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    #[must_use]
    pub fn inner_width(&self) -> f64 {
        self.original.range_span_px()
    }

    #[must_use]
    pub fn effective_scale(&self) -> TimeScale {
        self.transform.rescale(self.original)
    }

    #[must_use]
    pub fn visible_domain(&self) -> TimeDomain {
        let (start, end) = self.effective_scale().domain();
        TimeDomain { start, end }
    }

    #[must_use]
    pub fn pixels_per_day(&self) -> f64 {
        self.effective_scale().pixels_per_day()
    }

    #[must_use]
    pub fn granularity(&self, thresholds: GranularityThresholds) -> Granularity {
        thresholds.classify(self.pixels_per_day())
    }

    /// Zoom factor a preset for `granularity` lands on.
    ///
    /// Targets the center of the granularity's density band. When the zoom
    /// limits clamp that target, the clamped factor is kept only if it still
    /// classifies as `granularity`; otherwise the preset is unreachable.
    pub fn scale_for_granularity(
        &self,
        granularity: Granularity,
        thresholds: GranularityThresholds,
    ) -> GanttResult<f64> {
        let base_density = self.original.pixels_per_day();
        let target = thresholds.target_pixels_per_day(granularity) / base_density;
        if self.limits.contains(target) {
            return Ok(target);
        }
        let clamped = self.limits.clamp(target);
        if thresholds.classify(base_density * clamped) == granularity {
            return Ok(clamped);
        }
        Err(GanttError::InvalidData(format!(
            "{granularity:?} needs zoom factor {target:.4}, outside [{}, {}]",
            self.limits.min_scale_factor, self.limits.max_scale_factor
        )))
    }

    /// Adopts a gesture transform, clamping its scale around the viewport
    /// center. Returns the new effective scale.
    pub fn apply_gesture(&mut self, raw: ZoomTransform) -> GanttResult<TimeScale> {
        if !raw.is_valid() {
            return Err(GanttError::InvalidData(format!(
                "gesture transform must be finite with k > 0 (k={}, x={})",
                raw.k, raw.x
            )));
        }
        let center = self.inner_width() / 2.0;
        self.transform = raw.clamp_scale(self.limits, center);
        Ok(self.effective_scale())
    }

    pub fn reset(&mut self) {
        self.transform = ZoomTransform::IDENTITY;
    }

    /// Transform that shows `[start, end]` across the viewport with
    /// `anchor` placed `anchor_offset_px` from the left edge.
    pub fn compute_zoom_to_range(
        &self,
        start: f64,
        end: f64,
        anchor: f64,
        anchor_offset_px: f64,
    ) -> GanttResult<ZoomTransform> {
        let span_px = self.original.map(end) - self.original.map(start);
        if !span_px.is_finite() || span_px <= 0.0 {
            return Err(GanttError::InvalidData(format!(
                "zoom range must be finite with start < end (start={start}, end={end})"
            )));
        }
        let k = self.limits.clamp(self.inner_width() / span_px);
        let x = -self.original.map(anchor) * k + anchor_offset_px;
        ZoomTransform::new(k, x)
    }

    pub fn zoom_to_range(
        &mut self,
        start: f64,
        end: f64,
        anchor: f64,
        anchor_offset_px: f64,
    ) -> GanttResult<ZoomTransform> {
        self.transform = self.compute_zoom_to_range(start, end, anchor, anchor_offset_px)?;
        Ok(self.transform)
    }

    /// Checks `transform` against the base and data domains without
    /// mutating the engine.
    ///
    /// The transform is rejected when its visible domain lies entirely
    /// outside the base domain, or when it overlaps the data domain by less
    /// than `min_overlap_ratio` of the shorter of the two spans.
    #[must_use]
    pub fn validate_transform(
        &self,
        transform: ZoomTransform,
        data: TimeDomain,
        min_overlap_ratio: f64,
    ) -> TransformValidation {
        if !transform.is_valid() {
            return TransformValidation {
                transform: ZoomTransform::IDENTITY,
                reset: Some(ResetReason::NonFinite),
            };
        }
        let (start, end) = transform.rescale(self.original).domain();
        let visible = TimeDomain { start, end };

        let reason = if !visible.intersects(self.base) {
            Some(ResetReason::OutsideBaseDomain)
        } else {
            let reference = visible.span_ms().min(data.span_ms());
            let overlap = visible.overlap_ms(data);
            (overlap < min_overlap_ratio * reference).then_some(ResetReason::InsufficientOverlap)
        };

        match reason {
            Some(reason) => TransformValidation {
                transform: ZoomTransform::IDENTITY,
                reset: Some(reason),
            },
            None => TransformValidation {
                transform,
                reset: None,
            },
        }
    }

    pub fn reset_if_out_of_bounds(
        &mut self,
        data: TimeDomain,
        min_overlap_ratio: f64,
    ) -> TransformValidation {
        let validation = self.validate_transform(self.transform, data, min_overlap_ratio);
        if let Some(reason) = validation.reset {
            debug!(?reason, k = self.transform.k, x = self.transform.x, "transform reset to identity");
        }
        self.transform = validation.transform;
        validation
    }

    /// Resizes the pixel range. The transform is kept as-is.
    pub fn set_inner_width(&mut self, inner_width_px: f64) -> GanttResult<()> {
        self.original = original_scale(self.base, inner_width_px)?;
        Ok(())
    }

    /// Replaces the base domain, re-deriving the transform so the same
    /// dates stay visible.
    pub fn rebase(&mut self, base: TimeDomain, inner_width_px: f64) -> GanttResult<()> {
        let visible = self.visible_domain();
        let original = original_scale(base, inner_width_px)?;
        let keep_identity = self.transform.is_identity();
        self.base = base;
        self.original = original;
        if keep_identity {
            return Ok(());
        }

        let k = self.limits.clamp(base.span_ms() / visible.span_ms());
        let x = -original.map(visible.start) * k;
        self.transform = ZoomTransform::new(k, x).unwrap_or(ZoomTransform::IDENTITY);
        Ok(())
    }
}

/// Picks the anchor date for a preset zoom.
///
/// Prefers the earliest start at or after `left_edge`; otherwise the
/// latest start before it. `None` when `starts` is empty.
#[must_use]
pub fn nearest_anchor<I>(starts: I, left_edge: f64) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut after: Option<OrderedFloat<f64>> = None;
    let mut before: Option<OrderedFloat<f64>> = None;
    for start in starts.into_iter().filter(|value| value.is_finite()) {
        let start = OrderedFloat(start);
        if start.0 >= left_edge {
            after = Some(after.map_or(start, |current| current.min(start)));
        } else {
            before = Some(before.map_or(start, |current| current.max(start)));
        }
    }
    after.or(before).map(OrderedFloat::into_inner)
}

fn original_scale(base: TimeDomain, inner_width_px: f64) -> GanttResult<TimeScale> {
    if !inner_width_px.is_finite() || inner_width_px <= 0.0 {
        return Err(GanttError::InvalidData(format!(
            "chart width must be finite and > 0 (got {inner_width_px})"
        )));
    }
    TimeScale::new(base.as_tuple(), (0.0, inner_width_px))
}

#[cfg(test)]
mod tests {
    use super::{TransformEngine, nearest_anchor};
    use crate::core::base_domain::TimeDomain;
    use crate::core::granularity::{Granularity, GranularityThresholds};
    use crate::core::primitives::MILLIS_PER_DAY;
    use crate::core::zoom_transform::{ZoomLimits, ZoomTransform};

    fn engine() -> TransformEngine {
        let base = TimeDomain::new(0.0, 1_000.0).expect("domain");
        TransformEngine::new(base, 100.0, ZoomLimits::default()).expect("engine")
    }

    #[test]
    fn gesture_scale_is_clamped() {
        let mut engine = engine();
        engine
            .apply_gesture(ZoomTransform::new(0.01, 0.0).expect("transform"))
            .expect("gesture");
        assert_eq!(engine.transform().k, ZoomLimits::default().min_scale_factor);
    }

    #[test]
    fn zoom_to_range_places_anchor_at_offset() {
        let mut engine = engine();
        engine.zoom_to_range(200.0, 400.0, 250.0, 20.0).expect("zoom");
        let effective = engine.effective_scale();
        assert!((effective.map(250.0) - 20.0).abs() <= 1e-9);
        assert!((engine.transform().k - 5.0).abs() <= 1e-9);
    }

    #[test]
    fn rebase_keeps_visible_dates() {
        let mut engine = engine();
        engine.zoom_to_range(200.0, 400.0, 200.0, 0.0).expect("zoom");
        let before = engine.visible_domain();
        engine
            .rebase(TimeDomain::new(-500.0, 2_000.0).expect("domain"), 100.0)
            .expect("rebase");
        let after = engine.visible_domain();
        assert!((before.start - after.start).abs() <= 1e-6);
        assert!((before.end - after.end).abs() <= 1e-6);
    }

    #[test]
    fn granularity_follows_effective_pixel_density() {
        let thresholds = GranularityThresholds::default();
        let days = 40.0 * MILLIS_PER_DAY;
        let base = TimeDomain::new(0.0, days).expect("domain");
        let mut engine = TransformEngine::new(base, 400.0, ZoomLimits::default()).expect("engine");
        assert!((engine.pixels_per_day() - 10.0).abs() <= 1e-9);
        assert_eq!(engine.granularity(thresholds), Granularity::Month);

        engine
            .apply_gesture(ZoomTransform::new(2.0, 0.0).expect("transform"))
            .expect("gesture");
        assert!((engine.pixels_per_day() - 20.0).abs() <= 1e-9);
        assert_eq!(engine.granularity(thresholds), Granularity::Day);
    }

    #[test]
    fn preset_scale_stays_in_band_or_is_rejected() {
        let thresholds = GranularityThresholds::default();
        // 800 days over 6000 px: 7.5 px per day at identity.
        let base = TimeDomain::new(0.0, 800.0 * MILLIS_PER_DAY).expect("domain");
        let engine = TransformEngine::new(base, 6_000.0, ZoomLimits::default()).expect("engine");

        let month = engine
            .scale_for_granularity(Granularity::Month, thresholds)
            .expect("month reachable");
        assert!(ZoomLimits::default().contains(month));
        assert_eq!(thresholds.classify(7.5 * month), Granularity::Month);

        // Year needs k = 0.5 / 7.5, far under the 0.35 floor, and the floor
        // still draws 2.6 px per day.
        assert!(engine.scale_for_granularity(Granularity::Year, thresholds).is_err());

        let tight = ZoomLimits {
            min_scale_factor: 0.35,
            max_scale_factor: 10.0,
        };
        let engine = TransformEngine::new(base, 6_000.0, tight).expect("engine");
        // Hour wants k = 500 / 7.5; clamped to 10 gives 75 px per day (Day).
        assert!(engine.scale_for_granularity(Granularity::Hour, thresholds).is_err());
        assert!(!tight.contains(500.0 / 7.5));
    }

    #[test]
    fn anchor_prefers_first_start_after_left_edge() {
        assert_eq!(nearest_anchor([50.0, 300.0, 120.0], 100.0), Some(120.0));
        assert_eq!(nearest_anchor([50.0, 80.0], 100.0), Some(80.0));
        assert_eq!(nearest_anchor(std::iter::empty(), 100.0), None);
    }
}
