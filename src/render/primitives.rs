use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{GanttError, GanttResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(value: &str) -> GanttResult<Self> {
        let digits = value.trim().trim_start_matches('#');
        let channel = |index: usize, width: usize| -> GanttResult<f64> {
            let slice = digits
                .get(index * width..(index + 1) * width)
                .ok_or_else(|| invalid_hex(value))?;
            let raw = u8::from_str_radix(slice, 16).map_err(|_| invalid_hex(value))?;
            let raw = if width == 1 { raw * 17 } else { raw };
            Ok(f64::from(raw) / 255.0)
        };
        match digits.len() {
            3 => Ok(Self::rgb(channel(0, 1)?, channel(1, 1)?, channel(2, 1)?)),
            6 => Ok(Self::rgb(channel(0, 2)?, channel(1, 2)?, channel(2, 2)?)),
            8 => Ok(Self::rgba(
                channel(0, 2)?,
                channel(1, 2)?,
                channel(2, 2)?,
                channel(3, 2)?,
            )),
            _ => Err(invalid_hex(value)),
        }
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        let byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            byte(self.red),
            byte(self.green),
            byte(self.blue)
        )
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Mixes toward white by `amount` in `[0, 1]`.
    #[must_use]
    pub fn lighten(self, amount: f64) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let mix = |channel: f64| channel + (1.0 - channel) * amount;
        Self::rgba(mix(self.red), mix(self.green), mix(self.blue), self.alpha)
    }

    pub fn validate(self) -> GanttResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(GanttError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

fn invalid_hex(value: &str) -> GanttError {
    GanttError::InvalidData(format!("invalid hex color `{value}`"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineStrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    pub stroke_style: LineStrokeStyle,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
            stroke_style: LineStrokeStyle::Solid,
        }
    }

    #[must_use]
    pub const fn with_stroke_style(mut self, stroke_style: LineStrokeStyle) -> Self {
        self.stroke_style = stroke_style;
        self
    }

    pub fn validate(self) -> GanttResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(GanttError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(GanttError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Draw command for one axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
    pub border_width: f64,
    pub border_color: Color,
    pub corner_radius: f64,
    /// Backends that support gradients fill with this id instead.
    pub gradient_id: Option<String>,
}

impl RectPrimitive {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
            border_width: 0.0,
            border_color: fill_color,
            corner_radius: 0.0,
            gradient_id: None,
        }
    }

    #[must_use]
    pub fn with_border(mut self, border_width: f64, border_color: Color) -> Self {
        self.border_width = border_width;
        self.border_color = border_color;
        self
    }

    #[must_use]
    pub fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    #[must_use]
    pub fn with_gradient(mut self, gradient_id: impl Into<String>) -> Self {
        self.gradient_id = Some(gradient_id.into());
        self
    }

    pub fn validate(&self) -> GanttResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(GanttError::InvalidData(
                "rect origin must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite() || !self.height.is_finite() || self.width < 0.0 || self.height < 0.0
        {
            return Err(GanttError::InvalidData(
                "rect size must be finite and >= 0".to_owned(),
            ));
        }
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(GanttError::InvalidData(
                "rect border width must be finite and >= 0".to_owned(),
            ));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(GanttError::InvalidData(
                "rect corner radius must be finite and >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()?;
        self.border_color.validate()
    }
}

/// One SVG-style path command in absolute pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    HorizontalTo { x: f64 },
    VerticalTo { y: f64 },
    Close,
}

pub type PathCommands = SmallVec<[PathCommand; 8]>;

/// Draw command for a filled and/or stroked path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    pub commands: PathCommands,
    pub fill_color: Option<Color>,
    pub stroke_color: Option<Color>,
    pub stroke_width: f64,
}

impl PathPrimitive {
    #[must_use]
    pub fn filled(commands: PathCommands, fill_color: Color) -> Self {
        Self {
            commands,
            fill_color: Some(fill_color),
            stroke_color: None,
            stroke_width: 0.0,
        }
    }

    #[must_use]
    pub fn stroked(commands: PathCommands, stroke_color: Color, stroke_width: f64) -> Self {
        Self {
            commands,
            fill_color: None,
            stroke_color: Some(stroke_color),
            stroke_width,
        }
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke_color: Color, stroke_width: f64) -> Self {
        self.stroke_color = Some(stroke_color);
        self.stroke_width = stroke_width;
        self
    }

    /// SVG `d` attribute for the command list.
    #[must_use]
    pub fn svg_path_data(&self) -> String {
        svg_path_data(&self.commands)
    }

    pub fn validate(&self) -> GanttResult<()> {
        if !matches!(self.commands.first(), Some(PathCommand::MoveTo { .. })) {
            return Err(GanttError::InvalidData(
                "path must start with a move command".to_owned(),
            ));
        }
        let finite = self.commands.iter().all(|command| match *command {
            PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => {
                x.is_finite() && y.is_finite()
            }
            PathCommand::HorizontalTo { x } => x.is_finite(),
            PathCommand::VerticalTo { y } => y.is_finite(),
            PathCommand::Close => true,
        });
        if !finite {
            return Err(GanttError::InvalidData(
                "path coordinates must be finite".to_owned(),
            ));
        }
        if self.fill_color.is_none() && self.stroke_color.is_none() {
            return Err(GanttError::InvalidData(
                "path needs a fill or a stroke".to_owned(),
            ));
        }
        if self.stroke_color.is_some()
            && (!self.stroke_width.is_finite() || self.stroke_width <= 0.0)
        {
            return Err(GanttError::InvalidData(
                "path stroke width must be finite and > 0".to_owned(),
            ));
        }
        if let Some(color) = self.fill_color {
            color.validate()?;
        }
        if let Some(color) = self.stroke_color {
            color.validate()?;
        }
        Ok(())
    }
}

#[must_use]
pub fn svg_path_data(commands: &[PathCommand]) -> String {
    let mut out = String::with_capacity(commands.len() * 10);
    for command in commands {
        // Writing into a String cannot fail.
        let _ = match *command {
            PathCommand::MoveTo { x, y } => write!(out, "M{},{}", number(x), number(y)),
            PathCommand::LineTo { x, y } => write!(out, "L{},{}", number(x), number(y)),
            PathCommand::HorizontalTo { x } => write!(out, "H{}", number(x)),
            PathCommand::VerticalTo { y } => write!(out, "V{}", number(y)),
            PathCommand::Close => write!(out, "Z"),
        };
    }
    out
}

fn number(value: f64) -> String {
    let rounded = (value * 1_000.0).round() / 1_000.0;
    if rounded == 0.0 {
        return "0".to_owned();
    }
    let text = format!("{rounded:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

/// Two-stop split fill: `start_color` up to `split_ratio`, `end_color` after.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientPrimitive {
    pub id: String,
    pub split_ratio: f64,
    pub start_color: Color,
    pub end_color: Color,
}

impl GradientPrimitive {
    pub fn validate(&self) -> GanttResult<()> {
        if self.id.is_empty() {
            return Err(GanttError::InvalidData(
                "gradient id must not be empty".to_owned(),
            ));
        }
        if !self.split_ratio.is_finite() || !(0.0..=1.0).contains(&self.split_ratio) {
            return Err(GanttError::InvalidData(
                "gradient split ratio must be finite and in [0, 1]".to_owned(),
            ));
        }
        self.start_color.validate()?;
        self.end_color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    pub bold: bool,
    pub italic: bool,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            bold: false,
            italic: false,
        }
    }

    #[must_use]
    pub fn with_emphasis(mut self, bold: bool, italic: bool) -> Self {
        self.bold = bold;
        self.italic = italic;
        self
    }

    pub fn validate(&self) -> GanttResult<()> {
        if self.text.is_empty() {
            return Err(GanttError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(GanttError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(GanttError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::{Color, PathCommand, PathPrimitive, svg_path_data};

    #[test]
    fn hex_colors_parse_in_all_widths() {
        assert_eq!(Color::from_hex("#fff").expect("short"), Color::WHITE);
        assert_eq!(Color::from_hex("00000080").expect("alpha").alpha, 128.0 / 255.0);
        assert_eq!(Color::from_hex("#1f77b4").expect("long").to_hex(), "#1f77b4");
        assert!(Color::from_hex("#12").is_err());
    }

    #[test]
    fn path_data_uses_compact_numbers() {
        let commands = [
            PathCommand::MoveTo { x: 1.0, y: 2.5 },
            PathCommand::HorizontalTo { x: 10.125 },
            PathCommand::VerticalTo { y: -3.0 },
            PathCommand::Close,
        ];
        assert_eq!(svg_path_data(&commands), "M1,2.5H10.125V-3Z");
    }

    #[test]
    fn path_without_paint_is_invalid() {
        let mut path = PathPrimitive::filled(smallvec![PathCommand::MoveTo { x: 0.0, y: 0.0 }], Color::BLACK);
        path.fill_color = None;
        assert!(path.validate().is_err());
    }
}
