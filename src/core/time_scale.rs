use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{MILLIS_PER_DAY, datetime_to_millis};
use crate::error::{GanttError, GanttResult};

/// Linear mapping from epoch milliseconds to horizontal pixels.
///
/// The domain is a time interval and the range a pixel interval, both
/// stored as `f64`. Mapping is a pure function of the four bounds, so the
/// same scale always yields the same pixel for the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl TimeScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> GanttResult<Self> {
        let (domain_start, domain_end) = domain;
        let (range_start, range_end) = range;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start >= domain_end {
            return Err(GanttError::InvalidData(
                "time scale domain must be finite with start < end".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() || range_start >= range_end {
            return Err(GanttError::InvalidData(
                "time scale range must be finite with start < end".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn domain_span_ms(self) -> f64 {
        self.domain_end - self.domain_start
    }

    #[must_use]
    pub fn domain_span_days(self) -> f64 {
        self.domain_span_ms() / MILLIS_PER_DAY
    }

    #[must_use]
    pub fn range_span_px(self) -> f64 {
        self.range_end - self.range_start
    }

    /// Maps a time value to pixels. Non-finite input yields `NaN`.
    #[must_use]
    pub fn map(self, time_ms: f64) -> f64 {
        if !time_ms.is_finite() {
            return f64::NAN;
        }
        let normalized = (time_ms - self.domain_start) / self.domain_span_ms();
        self.range_start + normalized * self.range_span_px()
    }

    /// Maps a time value and discards non-finite results.
    #[must_use]
    pub fn map_checked(self, time_ms: f64) -> Option<f64> {
        let px = self.map(time_ms);
        px.is_finite().then_some(px)
    }

    #[must_use]
    pub fn map_datetime(self, time: DateTime<Utc>) -> f64 {
        self.map(datetime_to_millis(time))
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        if !pixel.is_finite() {
            return f64::NAN;
        }
        let normalized = (pixel - self.range_start) / self.range_span_px();
        self.domain_start + normalized * self.domain_span_ms()
    }

    #[must_use]
    pub fn pixels_per_day(self) -> f64 {
        self.range_span_px() / self.domain_span_days()
    }

    /// Builds a scale from bounds already known to be valid.
    ///
    /// Falls back to `fallback` when the derived bounds degenerate.
    #[must_use]
    pub(crate) fn from_bounds_or(domain: (f64, f64), range: (f64, f64), fallback: Self) -> Self {
        Self::new(domain, range).unwrap_or(fallback)
    }
}
