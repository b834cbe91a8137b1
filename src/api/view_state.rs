use serde::{Deserialize, Serialize};

use crate::core::{DisplayFormat, ExpansionState, SelectionHandle, ZoomTransform};
use crate::error::{GanttError, GanttResult};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub top: f64,
}

impl ScrollOffset {
    pub const ORIGIN: Self = Self { top: 0.0 };

    /// Clamps into `[0, max_top]`; non-finite offsets go to the origin.
    #[must_use]
    pub fn clamped(self, max_top: f64) -> Self {
        if !self.top.is_finite() || !max_top.is_finite() {
            return Self::ORIGIN;
        }
        Self {
            top: self.top.clamp(0.0, max_top.max(0.0)),
        }
    }
}

/// Every piece of mutable view state, as one value.
///
/// Frames are a pure function of the task rows, this value, the layout and
/// the theme.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub transform: ZoomTransform,
    pub scroll: ScrollOffset,
    pub expansion: ExpansionState,
    pub selected_format: DisplayFormat,
    pub selection: Option<SelectionHandle>,
}

impl ViewState {
    #[must_use]
    pub fn with_format(format: DisplayFormat) -> Self {
        Self {
            selected_format: format,
            ..Self::default()
        }
    }

    /// Identity transform and top-left scroll; expansion and format survive.
    #[must_use]
    pub fn reset_viewport(mut self) -> Self {
        self.transform = ZoomTransform::IDENTITY;
        self.scroll = ScrollOffset::ORIGIN;
        self
    }

    pub fn to_json(&self) -> GanttResult<String> {
        serde_json::to_string(self)
            .map_err(|e| GanttError::InvalidData(format!("failed to serialize view state: {e}")))
    }

    pub fn from_json_str(input: &str) -> GanttResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| GanttError::InvalidData(format!("failed to parse view state: {e}")))
    }
}
