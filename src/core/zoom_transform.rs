use serde::{Deserialize, Serialize};

use crate::core::time_scale::TimeScale;
use crate::error::{GanttError, GanttResult};

/// Affine zoom/pan state applied on top of the original time scale.
///
/// An effective pixel is `k * original(t) + x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self { k: 1.0, x: 0.0 };

    pub fn new(k: f64, x: f64) -> GanttResult<Self> {
        let transform = Self { k, x };
        if !transform.is_valid() {
            return Err(GanttError::InvalidData(format!(
                "zoom transform must have finite k > 0 and finite x (k={k}, x={x})"
            )));
        }
        Ok(transform)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.k.is_finite() && self.k > 0.0 && self.x.is_finite()
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    #[must_use]
    pub fn apply_x(self, pixel: f64) -> f64 {
        pixel * self.k + self.x
    }

    #[must_use]
    pub fn invert_x(self, pixel: f64) -> f64 {
        (pixel - self.x) / self.k
    }

    /// Derives the effective scale: same range, domain re-derived from the
    /// original scale through this transform.
    #[must_use]
    pub fn rescale(self, original: TimeScale) -> TimeScale {
        let (range_start, range_end) = original.range();
        let domain_start = original.invert(self.invert_x(range_start));
        let domain_end = original.invert(self.invert_x(range_end));
        TimeScale::from_bounds_or((domain_start, domain_end), (range_start, range_end), original)
    }

    /// Scales by `factor` keeping the pixel under `anchor_px` fixed.
    #[must_use]
    pub fn scale_by(self, factor: f64, anchor_px: f64) -> Self {
        self.scale_to(self.k * factor, anchor_px)
    }

    #[must_use]
    pub fn scale_to(self, k: f64, anchor_px: f64) -> Self {
        let original_px = self.invert_x(anchor_px);
        Self {
            k,
            x: anchor_px - original_px * k,
        }
    }

    #[must_use]
    pub fn translate_by(self, dx: f64) -> Self {
        Self {
            k: self.k,
            x: self.x + dx,
        }
    }

    /// Clamps the scale factor into `limits`, keeping `anchor_px` fixed.
    #[must_use]
    pub fn clamp_scale(self, limits: ZoomLimits, anchor_px: f64) -> Self {
        let clamped = limits.clamp(self.k);
        if clamped == self.k {
            self
        } else {
            self.scale_to(clamped, anchor_px)
        }
    }

    /// Interpolates between two transforms: `k` geometrically, `x` linearly.
    #[must_use]
    pub fn interpolate(from: Self, to: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return to;
        }
        let k = from.k * (to.k / from.k).powf(t);
        let x = from.x + (to.x - from.x) * t;
        Self { k, x }
    }
}

/// Bounds on the zoom scale factor. Pan is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub min_scale_factor: f64,
    pub max_scale_factor: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_scale_factor: 0.35,
            max_scale_factor: 2_000.0,
        }
    }
}

impl ZoomLimits {
    pub fn validate(self) -> GanttResult<Self> {
        if !self.min_scale_factor.is_finite()
            || !self.max_scale_factor.is_finite()
            || self.min_scale_factor <= 0.0
            || self.min_scale_factor > 1.0
            || self.max_scale_factor < 1.0
        {
            return Err(GanttError::InvalidConfig(format!(
                "zoom limits must satisfy 0 < min <= 1 <= max (min={}, max={})",
                self.min_scale_factor, self.max_scale_factor
            )));
        }
        Ok(self)
    }

    #[must_use]
    pub fn clamp(self, k: f64) -> f64 {
        k.clamp(self.min_scale_factor, self.max_scale_factor)
    }

    #[must_use]
    pub fn contains(self, k: f64) -> bool {
        k >= self.min_scale_factor && k <= self.max_scale_factor
    }
}
