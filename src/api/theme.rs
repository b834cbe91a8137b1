use serde::{Deserialize, Serialize};

use crate::error::{GanttError, GanttResult};
use crate::render::{Color, LineStrokeStyle};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontStyle {
    pub size_px: f64,
    pub color: Color,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl FontStyle {
    #[must_use]
    pub const fn new(size_px: f64, color: Color) -> Self {
        Self {
            size_px,
            color,
            bold: false,
            italic: false,
        }
    }

    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn validate(self, name: &str) -> GanttResult<()> {
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(GanttError::InvalidConfig(format!(
                "{name} font size must be finite and > 0"
            )));
        }
        self.color.validate()
    }
}

/// Label-panel column widths in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnWidths {
    pub task: f64,
    pub start: f64,
    pub end: f64,
    pub secondary_start: f64,
    pub secondary_end: f64,
    pub duration: f64,
    /// Width of each extra display column.
    pub extra: f64,
}

impl Default for ColumnWidths {
    fn default() -> Self {
        Self {
            task: 250.0,
            start: 160.0,
            end: 160.0,
            secondary_start: 160.0,
            secondary_end: 160.0,
            duration: 100.0,
            extra: 120.0,
        }
    }
}

/// Every style parameter the layer builders read, resolved once per update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GanttTheme {
    pub row_height: f64,
    /// Capped at `row_height` when resolved.
    pub bar_height: f64,
    pub bar_corner_radius: f64,
    pub bar_stroke_width: f64,
    pub bar_opacity: f64,
    pub unselected_bar_opacity: f64,
    /// Mix toward white applied to task bar fills.
    pub task_fill_lighten: f64,
    pub secondary_bar_height: f64,
    pub secondary_bar_color: Color,
    pub show_secondary_bars: bool,
    pub show_secondary_columns: bool,
    pub show_completion_labels: bool,
    pub show_duration_labels: bool,
    pub show_dependencies: bool,
    pub show_row_grid: bool,
    pub show_today_marker: bool,
    pub show_legend: bool,
    pub show_label_panel: bool,

    pub columns: ColumnWidths,
    pub label_panel_padding: f64,
    pub right_margin: f64,
    pub axis_height: f64,
    pub legend_height: f64,

    pub axis_font: FontStyle,
    pub axis_top_font: FontStyle,
    pub header_font: FontStyle,
    pub parent_font: FontStyle,
    pub task_font: FontStyle,
    pub bar_label_font: FontStyle,
    pub completion_label_font: FontStyle,
    pub today_font: FontStyle,
    pub legend_font: FontStyle,
    pub placeholder_font: FontStyle,

    pub background_color: Color,
    pub header_background: Color,
    pub parent_row_background: Color,
    pub axis_line_color: Color,
    pub row_grid_color: Color,
    pub calendar_line_color: Color,
    pub weekend_fill: Color,
    pub weekend_label_fill: Color,
    pub today_line_color: Color,
    pub today_line_style: LineStrokeStyle,
    pub dependency_color: Color,
    pub dependency_stroke_width: f64,
    pub dependency_gap_px: f64,
    pub dependency_arrow_px: f64,
    pub palette: Vec<Color>,
}

impl Default for GanttTheme {
    fn default() -> Self {
        let text = Color::rgb(0.2, 0.2, 0.2);
        Self {
            row_height: 40.0,
            bar_height: 30.0,
            bar_corner_radius: 3.0,
            bar_stroke_width: 1.0,
            bar_opacity: 1.0,
            unselected_bar_opacity: 0.3,
            task_fill_lighten: 0.5,
            secondary_bar_height: 6.0,
            secondary_bar_color: Color::rgb(0.55, 0.55, 0.55),
            show_secondary_bars: true,
            show_secondary_columns: false,
            show_completion_labels: true,
            show_duration_labels: true,
            show_dependencies: true,
            show_row_grid: true,
            show_today_marker: true,
            show_legend: true,
            show_label_panel: true,

            columns: ColumnWidths::default(),
            label_panel_padding: 10.0,
            right_margin: 20.0,
            axis_height: 60.0,
            legend_height: 24.0,

            axis_font: FontStyle::new(11.0, text),
            axis_top_font: FontStyle::new(12.0, text).bold(),
            header_font: FontStyle::new(12.0, text).bold(),
            parent_font: FontStyle::new(12.0, text).bold(),
            task_font: FontStyle::new(11.0, text),
            bar_label_font: FontStyle::new(10.0, text),
            completion_label_font: FontStyle::new(10.0, Color::WHITE),
            today_font: FontStyle::new(10.0, Color::rgb(0.84, 0.15, 0.16)),
            legend_font: FontStyle::new(11.0, text),
            placeholder_font: FontStyle::new(14.0, Color::rgb(0.17, 0.24, 0.31)),

            background_color: Color::WHITE,
            header_background: Color::rgb(0.96, 0.96, 0.97),
            parent_row_background: Color::rgb(0.93, 0.94, 0.96),
            axis_line_color: Color::rgb(0.6, 0.6, 0.6),
            row_grid_color: Color::rgb(0.9, 0.9, 0.9),
            calendar_line_color: Color::rgb(0.82, 0.82, 0.82),
            weekend_fill: Color::rgba(0.9, 0.9, 0.9, 0.5),
            weekend_label_fill: Color::rgb(0.92, 0.92, 0.92),
            today_line_color: Color::rgb(0.84, 0.15, 0.16),
            today_line_style: LineStrokeStyle::Dashed,
            dependency_color: Color::rgb(0.4, 0.4, 0.4),
            dependency_stroke_width: 1.5,
            dependency_gap_px: 8.0,
            dependency_arrow_px: 6.0,
            palette: default_palette(),
        }
    }
}

fn default_palette() -> Vec<Color> {
    [
        (0x1f, 0x77, 0xb4),
        (0xff, 0x7f, 0x0e),
        (0x2c, 0xa0, 0x2c),
        (0xd6, 0x27, 0x28),
        (0x94, 0x67, 0xbd),
        (0x8c, 0x56, 0x4b),
        (0xe3, 0x77, 0xc2),
        (0x7f, 0x7f, 0x7f),
        (0xbc, 0xbd, 0x22),
        (0x17, 0xbe, 0xcf),
    ]
    .into_iter()
    .map(|(r, g, b)| Color::rgb(f64::from(r) / 255.0, f64::from(g) / 255.0, f64::from(b) / 255.0))
    .collect()
}

impl GanttTheme {
    /// Bar height actually drawn: never taller than a row.
    #[must_use]
    pub fn effective_bar_height(&self) -> f64 {
        self.bar_height.min(self.row_height)
    }

    pub fn validate(self) -> GanttResult<Self> {
        for (name, value) in [
            ("row_height", self.row_height),
            ("bar_height", self.bar_height),
            ("axis_height", self.axis_height),
            ("dependency_stroke_width", self.dependency_stroke_width),
            ("bar_stroke_width", self.bar_stroke_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GanttError::InvalidConfig(format!(
                    "theme `{name}` must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("bar_corner_radius", self.bar_corner_radius),
            ("secondary_bar_height", self.secondary_bar_height),
            ("label_panel_padding", self.label_panel_padding),
            ("right_margin", self.right_margin),
            ("legend_height", self.legend_height),
            ("dependency_gap_px", self.dependency_gap_px),
            ("dependency_arrow_px", self.dependency_arrow_px),
            ("columns.task", self.columns.task),
            ("columns.start", self.columns.start),
            ("columns.end", self.columns.end),
            ("columns.secondary_start", self.columns.secondary_start),
            ("columns.secondary_end", self.columns.secondary_end),
            ("columns.duration", self.columns.duration),
            ("columns.extra", self.columns.extra),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GanttError::InvalidConfig(format!(
                    "theme `{name}` must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("bar_opacity", self.bar_opacity),
            ("unselected_bar_opacity", self.unselected_bar_opacity),
            ("task_fill_lighten", self.task_fill_lighten),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(GanttError::InvalidConfig(format!(
                    "theme `{name}` must be in [0, 1]"
                )));
            }
        }
        if self.palette.is_empty() {
            return Err(GanttError::InvalidConfig(
                "theme palette must not be empty".to_owned(),
            ));
        }

        for (name, font) in [
            ("axis", self.axis_font),
            ("axis_top", self.axis_top_font),
            ("header", self.header_font),
            ("parent", self.parent_font),
            ("task", self.task_font),
            ("bar_label", self.bar_label_font),
            ("completion_label", self.completion_label_font),
            ("today", self.today_font),
            ("legend", self.legend_font),
            ("placeholder", self.placeholder_font),
        ] {
            font.validate(name)?;
        }
        for color in [
            self.secondary_bar_color,
            self.background_color,
            self.header_background,
            self.parent_row_background,
            self.axis_line_color,
            self.row_grid_color,
            self.calendar_line_color,
            self.weekend_fill,
            self.weekend_label_fill,
            self.today_line_color,
            self.dependency_color,
        ]
        .into_iter()
        .chain(self.palette.iter().copied())
        {
            color.validate().map_err(|err| GanttError::InvalidConfig(err.to_string()))?;
        }
        Ok(self)
    }
}
