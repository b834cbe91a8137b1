use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::calendar::CalendarUnit;
use crate::core::time_scale::TimeScale;
use crate::error::{GanttError, GanttResult};

/// Calendar granularity of the axis and background, finest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Granularity {
    Hour,
    Day,
    Month,
    Year,
}

impl Granularity {
    #[must_use]
    pub fn calendar_unit(self) -> CalendarUnit {
        match self {
            Self::Hour => CalendarUnit::Hour,
            Self::Day => CalendarUnit::Day,
            Self::Month => CalendarUnit::Month,
            Self::Year => CalendarUnit::Year,
        }
    }

    #[must_use]
    pub fn display_format(self) -> DisplayFormat {
        match self {
            Self::Hour => DisplayFormat::Hour,
            Self::Day => DisplayFormat::Day,
            Self::Month => DisplayFormat::Month,
            Self::Year => DisplayFormat::Year,
        }
    }
}

/// User-selectable zoom preset. `All` fits the whole data domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DisplayFormat {
    Hour,
    Day,
    Month,
    Year,
    #[default]
    All,
}

impl DisplayFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "Hour",
            Self::Day => "Day",
            Self::Month => "Month",
            Self::Year => "Year",
            Self::All => "All",
        }
    }

    #[must_use]
    pub fn granularity(self) -> Option<Granularity> {
        match self {
            Self::Hour => Some(Granularity::Hour),
            Self::Day => Some(Granularity::Day),
            Self::Month => Some(Granularity::Month),
            Self::Year => Some(Granularity::Year),
            Self::All => None,
        }
    }

    /// Case-insensitive lookup that also accepts the Spanish labels used by
    /// older persisted reports.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hour" | "hora" => Some(Self::Hour),
            "day" | "día" | "dia" => Some(Self::Day),
            "month" | "mes" => Some(Self::Month),
            "year" | "año" | "ano" => Some(Self::Year),
            "all" | "todo" => Some(Self::All),
            _ => None,
        }
    }
}

impl fmt::Display for DisplayFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayFormat {
    type Err = GanttError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
            .ok_or_else(|| GanttError::InvalidData(format!("unknown display format `{value}`")))
    }
}

/// Pixel-per-day thresholds separating the granularity bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GranularityThresholds {
    pub hour_above_px_per_day: f64,
    pub day_above_px_per_day: f64,
    pub month_above_px_per_day: f64,
}

impl Default for GranularityThresholds {
    fn default() -> Self {
        Self {
            hour_above_px_per_day: 125.0,
            day_above_px_per_day: 17.0,
            month_above_px_per_day: 2.0,
        }
    }
}

/// Open-ended bands place their preset this factor past the single bound.
const OPEN_BAND_FACTOR: f64 = 4.0;

impl GranularityThresholds {
    pub fn validate(self) -> GanttResult<Self> {
        let values = [
            self.hour_above_px_per_day,
            self.day_above_px_per_day,
            self.month_above_px_per_day,
        ];
        if values.iter().any(|value| !value.is_finite() || *value <= 0.0) {
            return Err(GanttError::InvalidConfig(
                "granularity thresholds must be finite and > 0".to_owned(),
            ));
        }
        if !(self.hour_above_px_per_day > self.day_above_px_per_day
            && self.day_above_px_per_day > self.month_above_px_per_day)
        {
            return Err(GanttError::InvalidConfig(
                "granularity thresholds must decrease from hour to month".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Classifies a pixel density. Non-finite densities read as `Year`.
    #[must_use]
    pub fn classify(self, pixels_per_day: f64) -> Granularity {
        if !pixels_per_day.is_finite() {
            return if pixels_per_day == f64::INFINITY {
                Granularity::Hour
            } else {
                Granularity::Year
            };
        }
        if pixels_per_day > self.hour_above_px_per_day {
            Granularity::Hour
        } else if pixels_per_day > self.day_above_px_per_day {
            Granularity::Day
        } else if pixels_per_day > self.month_above_px_per_day {
            Granularity::Month
        } else {
            Granularity::Year
        }
    }

    /// Pixel density a preset zooms to: the geometric center of its band.
    #[must_use]
    pub fn target_pixels_per_day(self, granularity: Granularity) -> f64 {
        match granularity {
            Granularity::Hour => self.hour_above_px_per_day * OPEN_BAND_FACTOR,
            Granularity::Day => (self.hour_above_px_per_day * self.day_above_px_per_day).sqrt(),
            Granularity::Month => (self.day_above_px_per_day * self.month_above_px_per_day).sqrt(),
            Granularity::Year => self.month_above_px_per_day / OPEN_BAND_FACTOR,
        }
    }
}

/// Granularity of an effective scale drawn across `viewport_width_px`.
#[must_use]
pub fn select_granularity(
    effective: TimeScale,
    viewport_width_px: f64,
    thresholds: GranularityThresholds,
) -> Granularity {
    thresholds.classify(viewport_width_px / effective.domain_span_days())
}
