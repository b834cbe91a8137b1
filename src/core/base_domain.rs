use serde::{Deserialize, Serialize};

use crate::core::calendar::{self, CalendarUnit};
use crate::core::primitives::{MILLIS_PER_DAY, MILLIS_PER_HOUR};
use crate::core::task::Task;
use crate::error::{GanttError, GanttResult};

/// Closed time interval in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeDomain {
    pub start: f64,
    pub end: f64,
}

impl TimeDomain {
    pub fn new(start: f64, end: f64) -> GanttResult<Self> {
        if !start.is_finite() || !end.is_finite() || start >= end {
            return Err(GanttError::InvalidData(format!(
                "time domain must be finite with start < end (start={start}, end={end})"
            )));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn span_ms(self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn span_days(self) -> f64 {
        self.span_ms() / MILLIS_PER_DAY
    }

    #[must_use]
    pub fn contains(self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }

    #[must_use]
    pub fn overlap_ms(self, other: Self) -> f64 {
        (self.end.min(other.end) - self.start.max(other.start)).max(0.0)
    }

    #[must_use]
    pub fn intersects(self, other: Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    #[must_use]
    pub fn as_tuple(self) -> (f64, f64) {
        (self.start, self.end)
    }
}

/// Data extent of the task set plus the buffered domain of the original scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseTimeDomain {
    data: TimeDomain,
    base: TimeDomain,
}

impl BaseTimeDomain {
    /// Computes both domains from the primary task dates.
    ///
    /// Returns `None` when no task carries a usable start and end.
    #[must_use]
    pub fn from_tasks(tasks: &[Task], buffer_days: f64) -> Option<Self> {
        let data = data_domain_of(tasks)?;
        Self::from_data_domain(data, buffer_days).ok()
    }

    pub fn from_data_domain(data: TimeDomain, buffer_days: f64) -> GanttResult<Self> {
        if !buffer_days.is_finite() || buffer_days < 0.0 {
            return Err(GanttError::InvalidConfig(format!(
                "base domain buffer must be finite and >= 0 (got {buffer_days})"
            )));
        }
        let buffer = buffer_days * MILLIS_PER_DAY;
        let start = calendar::floor(CalendarUnit::Day, data.start) - buffer;
        let end = calendar::offset(CalendarUnit::Day, data.end, 1) + buffer;
        Ok(Self {
            data,
            base: TimeDomain::new(start, end)?,
        })
    }

    #[must_use]
    pub fn data_domain(self) -> TimeDomain {
        self.data
    }

    #[must_use]
    pub fn base_domain(self) -> TimeDomain {
        self.base
    }
}

/// Minimum primary start and maximum primary end over all tasks.
///
/// A collapsed or reversed extent is widened to one hour after the start.
#[must_use]
pub fn data_domain_of(tasks: &[Task]) -> Option<TimeDomain> {
    let start = tasks
        .iter()
        .filter_map(|task| task.start)
        .filter(|value| value.is_finite())
        .reduce(f64::min)?;
    let mut end = tasks
        .iter()
        .filter_map(|task| task.end)
        .filter(|value| value.is_finite())
        .reduce(f64::max)?;
    if start >= end {
        end = start + MILLIS_PER_HOUR;
    }
    TimeDomain::new(start, end).ok()
}

#[cfg(test)]
mod tests {
    use super::{BaseTimeDomain, TimeDomain};
    use crate::core::primitives::{MILLIS_PER_DAY, MILLIS_PER_HOUR};
    use crate::core::task::Task;

    #[test]
    fn single_instant_widens_by_one_hour() {
        let tasks = vec![Task::new("a", "g", 0).with_range_millis(Some(5_000.0), Some(5_000.0))];
        let domain = BaseTimeDomain::from_tasks(&tasks, 0.0).expect("domain");
        assert_eq!(domain.data_domain().end, 5_000.0 + MILLIS_PER_HOUR);
    }

    #[test]
    fn buffer_extends_both_sides() {
        let data = TimeDomain::new(10.0 * MILLIS_PER_DAY, 20.0 * MILLIS_PER_DAY).expect("data");
        let domain = BaseTimeDomain::from_data_domain(data, 365.0).expect("domain");
        assert_eq!(domain.base_domain().start, (10.0 - 365.0) * MILLIS_PER_DAY);
        assert_eq!(domain.base_domain().end, (21.0 + 365.0) * MILLIS_PER_DAY);
    }

    #[test]
    fn no_dates_means_no_domain() {
        let tasks = vec![Task::new("a", "g", 0)];
        assert!(BaseTimeDomain::from_tasks(&tasks, 365.0).is_none());
    }
}
