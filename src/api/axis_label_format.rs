use crate::core::calendar::{self, CalendarUnit};
use crate::core::{Granularity, MILLIS_PER_HOUR, MILLIS_PER_MINUTE};

/// Date pattern of the label panel's start/end columns.
pub const PANEL_DATE_PATTERN: &str = "%d/%m/%Y %H:%M";

/// Upper bound on boundaries enumerated for one band.
pub(super) const MAX_AXIS_BOUNDARIES: usize = 4_096;

/// Tick sequence for the bottom axis band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickPlan {
    pub unit: CalendarUnit,
    pub step: u32,
    pub pattern: &'static str,
}

/// Bottom band: one tick per unit, hours thinned out as the span grows.
#[must_use]
pub fn bottom_tick_plan(granularity: Granularity, visible_span_ms: f64) -> TickPlan {
    match granularity {
        Granularity::Hour => {
            let visible_hours = visible_span_ms / MILLIS_PER_HOUR;
            let step = if visible_hours > 48.0 {
                4
            } else if visible_hours > 24.0 {
                2
            } else {
                1
            };
            TickPlan {
                unit: CalendarUnit::Hour,
                step,
                pattern: "%H",
            }
        }
        Granularity::Day => TickPlan {
            unit: CalendarUnit::Day,
            step: 1,
            pattern: "%d",
        },
        Granularity::Month => TickPlan {
            unit: CalendarUnit::Month,
            step: 1,
            pattern: "%b %y",
        },
        Granularity::Year => TickPlan {
            unit: CalendarUnit::Year,
            step: 1,
            pattern: "%Y",
        },
    }
}

/// Top band: the next coarser unit, none above years.
#[must_use]
pub fn top_band_plan(granularity: Granularity) -> Option<TickPlan> {
    let (unit, pattern) = match granularity {
        Granularity::Hour => (CalendarUnit::Day, "%d/%m"),
        Granularity::Day => (CalendarUnit::Month, "%B %y"),
        Granularity::Month => (CalendarUnit::Year, "%Y"),
        Granularity::Year => return None,
    };
    Some(TickPlan {
        unit,
        step: 1,
        pattern,
    })
}

/// Tick instants in `[start, end)`, with `end` appended so every tick has
/// a successor to center its label against.
#[must_use]
pub fn tick_instants(plan: TickPlan, start: f64, end: f64) -> Vec<f64> {
    let mut ticks = calendar::boundaries(plan.unit, plan.step, start, end, MAX_AXIS_BOUNDARIES);
    if ticks.last().is_none_or(|last| *last < end) {
        ticks.push(end);
    }
    ticks
}

/// Coarse-band segments clipped to the visible domain.
///
/// The first segment starts at the visible start even when it falls
/// between unit boundaries.
#[must_use]
pub fn band_segments(plan: TickPlan, start: f64, end: f64) -> Vec<(f64, f64)> {
    let mut edges = vec![start];
    edges.extend(
        calendar::boundaries(plan.unit, 1, start, end, MAX_AXIS_BOUNDARIES)
            .into_iter()
            .filter(|edge| *edge > start),
    );
    edges.push(end);
    edges
        .windows(2)
        .filter(|pair| pair[1] > pair[0])
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

/// `Nm` under an hour, `Nd Hh` once it spans a day, `Nh` otherwise.
#[must_use]
pub fn format_duration_text(span_ms: f64) -> String {
    let minutes = (span_ms.max(0.0) / MILLIS_PER_MINUTE).floor() as i64;
    let hours = minutes / 60;
    let days = hours / 24;
    if minutes < 60 {
        format!("{minutes}m")
    } else if days > 0 {
        format!("{days}d {}h", hours % 24)
    } else {
        format!("{hours}h")
    }
}

#[must_use]
pub fn format_duration_label(task_id: &str, span_ms: f64) -> String {
    format!("{task_id} ({})", format_duration_text(span_ms))
}

#[must_use]
pub fn format_panel_date(millis: Option<f64>) -> String {
    millis
        .map(|value| calendar::format(value, PANEL_DATE_PATTERN))
        .unwrap_or_default()
}

/// Summed group duration; integral sums print without decimals.
#[must_use]
pub fn format_duration_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}
