pub mod band_scale;
pub mod base_domain;
pub mod calendar;
pub mod completion;
pub mod granularity;
pub mod primitives;
pub mod row_model;
pub mod task;
pub mod time_scale;
pub mod types;
pub mod viewport_transform;
pub mod zoom_transform;

pub use band_scale::RowBandScale;
pub use base_domain::{BaseTimeDomain, TimeDomain, data_domain_of};
pub use calendar::CalendarUnit;
pub use completion::{group_completion, normalize_completion, overlay_width};
pub use granularity::{
    DisplayFormat, Granularity, GranularityThresholds, select_granularity,
};
pub use primitives::{
    MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, datetime_to_millis, decimal_to_f64,
    millis_to_datetime,
};
pub use row_model::{ExpansionState, GroupRange, RowKey, RowModel, VisualRow, build_rows};
pub use task::{SelectionHandle, Task};
pub use time_scale::TimeScale;
pub use types::Viewport;
pub use viewport_transform::{ResetReason, TransformEngine, TransformValidation, nearest_anchor};
pub use zoom_transform::{ZoomLimits, ZoomTransform};
