use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{GanttError, GanttResult};

pub const MILLIS_PER_MINUTE: f64 = 60_000.0;
pub const MILLIS_PER_HOUR: f64 = 3_600_000.0;
pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> GanttResult<f64> {
    value.to_f64().ok_or_else(|| {
        GanttError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

/// Converts epoch milliseconds back to a UTC timestamp.
///
/// Returns `None` for non-finite input or instants chrono cannot represent.
#[must_use]
pub fn millis_to_datetime(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis.round() as i64)
}

#[must_use]
pub fn millis_to_days(millis: f64) -> f64 {
    millis / MILLIS_PER_DAY
}
