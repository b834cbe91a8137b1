use serde::{Deserialize, Serialize};

/// Named layer of the timeline scene, listed in paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GanttLayerKind {
    Background,
    Grid,
    SecondaryBars,
    Bars,
    Completion,
    BarLabels,
    Dependencies,
    Markers,
    Axis,
    RowLabels,
    Legend,
    Placeholder,
}

impl GanttLayerKind {
    /// Layers whose geometry follows the shared time scale.
    #[must_use]
    pub fn is_time_synchronized(self) -> bool {
        matches!(
            self,
            Self::Background
                | Self::SecondaryBars
                | Self::Bars
                | Self::Completion
                | Self::BarLabels
                | Self::Dependencies
                | Self::Markers
                | Self::Axis
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerStack {
    pub layers: Vec<GanttLayerKind>,
}

impl LayerStack {
    #[must_use]
    pub fn canonical() -> Self {
        Self {
            layers: vec![
                GanttLayerKind::Background,
                GanttLayerKind::Grid,
                GanttLayerKind::SecondaryBars,
                GanttLayerKind::Bars,
                GanttLayerKind::Completion,
                GanttLayerKind::BarLabels,
                GanttLayerKind::Dependencies,
                GanttLayerKind::Markers,
                GanttLayerKind::Axis,
                GanttLayerKind::RowLabels,
                GanttLayerKind::Legend,
                GanttLayerKind::Placeholder,
            ],
        }
    }
}
