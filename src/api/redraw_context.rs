use crate::core::{
    Granularity, GranularityThresholds, RowBandScale, RowModel, Task, TimeDomain, TimeScale,
    select_granularity,
};
use crate::error::GanttResult;

use super::{ChartLayout, ColorResolver, GanttTheme, ViewState};

/// Everything a frame is derived from besides the view state.
#[derive(Debug, Clone, Copy)]
pub struct RedrawInput<'a> {
    pub tasks: &'a [Task],
    pub rows: &'a RowModel,
    pub layout: &'a ChartLayout,
    pub theme: &'a GanttTheme,
    pub colors: &'a ColorResolver,
    pub original: TimeScale,
    pub thresholds: GranularityThresholds,
    pub today_ms: f64,
}

/// Per-frame geometry shared by every layer builder.
///
/// All horizontal positions go through the one effective scale held here.
#[derive(Debug, Clone)]
pub(super) struct RedrawContext<'a> {
    pub(super) input: RedrawInput<'a>,
    pub(super) view: &'a ViewState,
    pub(super) effective: TimeScale,
    pub(super) visible: TimeDomain,
    pub(super) granularity: Granularity,
    pub(super) bands: RowBandScale,
    pub(super) bar_height: f64,
}

impl<'a> RedrawContext<'a> {
    pub(super) fn new(input: RedrawInput<'a>, view: &'a ViewState) -> GanttResult<Self> {
        let effective = view.transform.rescale(input.original);
        let (start, end) = effective.domain();
        let granularity =
            select_granularity(effective, input.layout.chart_width, input.thresholds);
        let bands = RowBandScale::new(input.rows, input.theme.row_height)?;
        Ok(Self {
            input,
            view,
            effective,
            visible: TimeDomain { start, end },
            granularity,
            bands,
            bar_height: input.theme.effective_bar_height(),
        })
    }

    /// Chart-space x of an instant.
    pub(super) fn x(&self, time_ms: f64) -> f64 {
        self.input.layout.chart_left + self.effective.map(time_ms)
    }

    pub(super) fn row_top(&self, index: usize) -> f64 {
        self.input.layout.body_top() + self.bands.band_top(index) - self.view.scroll.top
    }

    pub(super) fn row_center(&self, index: usize) -> f64 {
        self.row_top(index) + self.bands.bandwidth() / 2.0
    }

    pub(super) fn bar_top(&self, index: usize) -> f64 {
        self.row_top(index) + (self.bands.bandwidth() - self.bar_height) / 2.0
    }

    pub(super) fn body_bottom(&self) -> f64 {
        self.input.layout.body_top() + self.input.layout.body_height
    }

    pub(super) fn chart_left(&self) -> f64 {
        self.input.layout.chart_left
    }

    pub(super) fn chart_right(&self) -> f64 {
        self.input.layout.chart_right()
    }

    pub(super) fn theme(&self) -> &'a GanttTheme {
        self.input.theme
    }
}
