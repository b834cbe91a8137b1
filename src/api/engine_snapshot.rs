use serde::{Deserialize, Serialize};

use crate::core::{DisplayFormat, Granularity, Viewport, ZoomTransform};
use crate::interaction::InteractionMode;

use super::{RenderStatus, ScrollOffset};

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub viewport: Viewport,
    pub data_revision: u64,
    pub task_count: usize,
    pub visible_rows: usize,
    pub data_domain: Option<(f64, f64)>,
    pub base_domain: Option<(f64, f64)>,
    pub original_range_px: Option<(f64, f64)>,
    pub visible_domain: Option<(f64, f64)>,
    pub transform: ZoomTransform,
    pub granularity: Option<Granularity>,
    pub selected_format: DisplayFormat,
    pub scroll: ScrollOffset,
    pub interaction_mode: InteractionMode,
    pub expanded_groups: Vec<(String, bool)>,
    pub frame: FrameSummary,
}

/// Primitive counts of the frame the current state produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSummary {
    pub status: RenderStatus,
    pub lines: usize,
    pub rects: usize,
    pub paths: usize,
    pub texts: usize,
    pub gradients: usize,
}
