//! UTC calendar arithmetic on epoch-millisecond instants.
//!
//! Every helper is total: instants chrono cannot represent pass through
//! unchanged, and boundary enumeration on them is empty.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_millis, millis_to_datetime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalendarUnit {
    Hour,
    Day,
    Month,
    Year,
}

#[must_use]
pub fn floor(unit: CalendarUnit, millis: f64) -> f64 {
    let Some(time) = millis_to_datetime(millis) else {
        return millis;
    };
    floor_datetime(unit, time).map_or(millis, datetime_to_millis)
}

#[must_use]
pub fn ceil(unit: CalendarUnit, millis: f64) -> f64 {
    let floored = floor(unit, millis);
    if floored >= millis {
        floored
    } else {
        offset(unit, floored, 1)
    }
}

/// Shifts `millis` by `count` units. Month and year offsets clamp the day
/// of month to the length of the target month.
#[must_use]
pub fn offset(unit: CalendarUnit, millis: f64, count: i32) -> f64 {
    let Some(time) = millis_to_datetime(millis) else {
        return millis;
    };
    offset_datetime(unit, time, count).map_or(millis, datetime_to_millis)
}

/// Enumerates unit boundaries in `[start, end)`.
///
/// With `step > 1`, only boundaries whose field value is a multiple of
/// `step` are kept (hour 0, 4, 8, ... for a 4-hour step), so ticks line up
/// across days. Enumeration stops after `max_count` values.
#[must_use]
pub fn boundaries(
    unit: CalendarUnit,
    step: u32,
    start: f64,
    end: f64,
    max_count: usize,
) -> Vec<f64> {
    let mut out = Vec::new();
    if !start.is_finite() || !end.is_finite() || start >= end || max_count == 0 {
        return out;
    }
    let step = step.max(1);

    let mut cursor = ceil(unit, start);
    let mut guard = 0_usize;
    while cursor < end && out.len() < max_count {
        if step == 1 || field_value(unit, cursor) % step == 0 {
            out.push(cursor);
        }
        let next = offset(unit, cursor, 1);
        if next <= cursor {
            break;
        }
        cursor = next;
        guard += 1;
        if guard > max_count.saturating_mul(step as usize) {
            break;
        }
    }
    out
}

#[must_use]
pub fn weekday(millis: f64) -> Option<Weekday> {
    millis_to_datetime(millis).map(|time| time.weekday())
}

#[must_use]
pub fn is_weekend(millis: f64) -> bool {
    matches!(weekday(millis), Some(Weekday::Sat | Weekday::Sun))
}

/// Formats an instant with a chrono `strftime` pattern. UTC, English names.
#[must_use]
pub fn format(millis: f64, pattern: &str) -> String {
    millis_to_datetime(millis)
        .map(|time| time.format(pattern).to_string())
        .unwrap_or_default()
}

fn field_value(unit: CalendarUnit, millis: f64) -> u32 {
    let Some(time) = millis_to_datetime(millis) else {
        return 0;
    };
    match unit {
        CalendarUnit::Hour => time.hour(),
        CalendarUnit::Day => time.day0(),
        CalendarUnit::Month => time.month0(),
        CalendarUnit::Year => time.year().unsigned_abs(),
    }
}

fn floor_datetime(unit: CalendarUnit, time: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let date = time.date_naive();
    let naive = match unit {
        CalendarUnit::Hour => date.and_hms_opt(time.hour(), 0, 0)?,
        CalendarUnit::Day => date.and_hms_opt(0, 0, 0)?,
        CalendarUnit::Month => {
            NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?.and_hms_opt(0, 0, 0)?
        }
        CalendarUnit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1)?.and_hms_opt(0, 0, 0)?,
    };
    Some(naive.and_utc())
}

fn offset_datetime(unit: CalendarUnit, time: DateTime<Utc>, count: i32) -> Option<DateTime<Utc>> {
    match unit {
        CalendarUnit::Hour => time.checked_add_signed(Duration::try_hours(i64::from(count))?),
        CalendarUnit::Day => time.checked_add_signed(Duration::try_days(i64::from(count))?),
        CalendarUnit::Month => shift_months(time, i64::from(count)),
        CalendarUnit::Year => shift_months(time, i64::from(count) * 12),
    }
}

fn shift_months(time: DateTime<Utc>, months: i64) -> Option<DateTime<Utc>> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        time.checked_add_months(magnitude)
    } else {
        time.checked_sub_months(magnitude)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{CalendarUnit, boundaries, ceil, floor, is_weekend, offset};
    use crate::core::primitives::datetime_to_millis;

    fn at(y: i32, m: u32, d: u32, h: u32) -> f64 {
        datetime_to_millis(Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single().expect("date"))
    }

    #[test]
    fn floor_and_ceil_respect_units() {
        let t = at(2024, 3, 15, 13) + 1_234.0;
        assert_eq!(floor(CalendarUnit::Day, t), at(2024, 3, 15, 0));
        assert_eq!(floor(CalendarUnit::Month, t), at(2024, 3, 1, 0));
        assert_eq!(ceil(CalendarUnit::Year, t), at(2025, 1, 1, 0));
        assert_eq!(ceil(CalendarUnit::Day, at(2024, 3, 15, 0)), at(2024, 3, 15, 0));
    }

    #[test]
    fn month_offset_clamps_day() {
        assert_eq!(offset(CalendarUnit::Month, at(2024, 1, 31, 0), 1), at(2024, 2, 29, 0));
        assert_eq!(offset(CalendarUnit::Year, at(2024, 6, 1, 0), -1), at(2023, 6, 1, 0));
    }

    #[test]
    fn stepped_hour_boundaries_align_to_field() {
        let ticks = boundaries(CalendarUnit::Hour, 4, at(2024, 1, 1, 1), at(2024, 1, 2, 0), 100);
        assert_eq!(ticks.first().copied(), Some(at(2024, 1, 1, 4)));
        assert_eq!(ticks.len(), 5);
    }

    #[test]
    fn weekend_detection_uses_utc() {
        assert!(is_weekend(at(2024, 1, 6, 12)));
        assert!(!is_weekend(at(2024, 1, 8, 12)));
    }
}
