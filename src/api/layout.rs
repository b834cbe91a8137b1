use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{GanttError, GanttResult};

use super::{ColumnHeaders, GanttTheme};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Task(usize),
    Start,
    End,
    SecondaryStart,
    SecondaryEnd,
    Duration,
    Extra(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub kind: ColumnKind,
    pub title: String,
    pub x: f64,
    pub width: f64,
}

/// Pixel regions of one frame: label panel on the left, header band on
/// top (legend then axis), timeline body below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub viewport: Viewport,
    pub panel_width: f64,
    pub chart_left: f64,
    pub chart_width: f64,
    pub legend_height: f64,
    pub axis_top: f64,
    pub header_height: f64,
    pub body_height: f64,
    pub columns: Vec<ColumnLayout>,
}

/// Which optional label-panel columns the current task set needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutNeeds {
    pub task_columns: usize,
    pub extra_columns: usize,
    pub durations: bool,
    pub legend: bool,
}

impl ChartLayout {
    pub fn resolve(
        viewport: Viewport,
        theme: &GanttTheme,
        headers: &ColumnHeaders,
        needs: LayoutNeeds,
    ) -> GanttResult<Self> {
        if !viewport.is_valid() {
            return Err(GanttError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let columns = if theme.show_label_panel {
            resolve_columns(theme, headers, needs)
        } else {
            Vec::new()
        };
        let panel_width = columns
            .last()
            .map_or(0.0, |column| column.x + column.width);
        let chart_left = panel_width;
        let chart_width = f64::from(viewport.width) - chart_left - theme.right_margin;
        if !chart_width.is_finite() || chart_width <= 0.0 {
            return Err(GanttError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let legend_height = if theme.show_legend && needs.legend {
            theme.legend_height
        } else {
            0.0
        };
        let header_height = legend_height + theme.axis_height;
        let body_height = (f64::from(viewport.height) - header_height).max(0.0);

        Ok(Self {
            viewport,
            panel_width,
            chart_left,
            chart_width,
            legend_height,
            axis_top: legend_height,
            header_height,
            body_height,
            columns,
        })
    }

    #[must_use]
    pub fn chart_right(&self) -> f64 {
        self.chart_left + self.chart_width
    }

    #[must_use]
    pub fn body_top(&self) -> f64 {
        self.header_height
    }

    #[must_use]
    pub fn max_scroll_top(&self, content_height: f64) -> f64 {
        (content_height - self.body_height).max(0.0)
    }

    #[must_use]
    pub fn column(&self, kind: ColumnKind) -> Option<&ColumnLayout> {
        self.columns.iter().find(|column| column.kind == kind)
    }
}

fn resolve_columns(theme: &GanttTheme, headers: &ColumnHeaders, needs: LayoutNeeds) -> Vec<ColumnLayout> {
    let widths = theme.columns;
    let mut entries: Vec<(ColumnKind, String, f64)> = (0..needs.task_columns.max(1))
        .map(|index| {
            let title = headers
                .task
                .get(index)
                .cloned()
                .unwrap_or_else(|| format!("Column {}", index + 1));
            (ColumnKind::Task(index), title, widths.task)
        })
        .collect();
    entries.push((ColumnKind::Start, headers.start.clone(), widths.start));
    entries.push((ColumnKind::End, headers.end.clone(), widths.end));
    if theme.show_secondary_columns {
        entries.push((
            ColumnKind::SecondaryStart,
            headers.secondary_start.clone(),
            widths.secondary_start,
        ));
        entries.push((
            ColumnKind::SecondaryEnd,
            headers.secondary_end.clone(),
            widths.secondary_end,
        ));
    }
    if needs.durations {
        entries.push((ColumnKind::Duration, headers.duration.clone(), widths.duration));
    }
    for index in 0..needs.extra_columns.max(headers.extra.len()) {
        let title = headers
            .extra
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("Extra {}", index + 1));
        entries.push((ColumnKind::Extra(index), title, widths.extra));
    }

    let mut x = theme.label_panel_padding;
    entries
        .into_iter()
        .map(|(kind, title, width)| {
            let column = ColumnLayout {
                kind,
                title,
                x,
                width,
            };
            x += width;
            column
        })
        .collect()
}
