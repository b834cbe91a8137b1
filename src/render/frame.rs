use crate::core::Viewport;
use crate::error::{GanttError, GanttResult};
use crate::render::{GradientPrimitive, LinePrimitive, PathPrimitive, RectPrimitive, TextPrimitive};

/// Backend-agnostic scene for one timeline draw pass.
///
/// Primitives of each kind are stored in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub gradients: Vec<GradientPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub paths: Vec<PathPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            gradients: Vec::new(),
            lines: Vec::new(),
            rects: Vec::new(),
            paths: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: PathPrimitive) -> Self {
        self.paths.push(path);
        self
    }

    pub fn validate(&self) -> GanttResult<()> {
        if !self.viewport.is_valid() {
            return Err(GanttError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for gradient in &self.gradients {
            gradient.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
            if let Some(id) = &rect.gradient_id {
                if !self.gradients.iter().any(|gradient| &gradient.id == id) {
                    return Err(GanttError::InvalidData(format!(
                        "rect references unknown gradient `{id}`"
                    )));
                }
            }
        }
        for path in &self.paths {
            path.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.rects.is_empty() && self.paths.is_empty() && self.texts.is_empty()
    }
}
