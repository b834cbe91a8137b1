use crate::core::Viewport;

use super::{
    GanttLayerKind, GradientPrimitive, LayerStack, LinePrimitive, PathPrimitive, RectPrimitive,
    RenderFrame, TextPrimitive,
};

#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: GanttLayerKind,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub paths: Vec<PathPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl LayerPrimitives {
    #[must_use]
    pub fn new(kind: GanttLayerKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
            rects: Vec::new(),
            paths: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.lines.len() + self.rects.len() + self.paths.len() + self.texts.len()
    }
}

/// Scene grouped by layer so every layer is rebuilt from the same inputs
/// in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredRenderFrame {
    pub viewport: Viewport,
    pub gradients: Vec<GradientPrimitive>,
    pub layers: Vec<LayerPrimitives>,
}

impl LayeredRenderFrame {
    #[must_use]
    pub fn from_stack(viewport: Viewport, stack: LayerStack) -> Self {
        Self {
            viewport,
            gradients: Vec::new(),
            layers: stack.layers.into_iter().map(LayerPrimitives::new).collect(),
        }
    }

    pub fn push_line(&mut self, kind: GanttLayerKind, line: LinePrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.lines.push(line);
        }
    }

    pub fn push_rect(&mut self, kind: GanttLayerKind, rect: RectPrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.rects.push(rect);
        }
    }

    pub fn push_path(&mut self, kind: GanttLayerKind, path: PathPrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.paths.push(path);
        }
    }

    pub fn push_text(&mut self, kind: GanttLayerKind, text: TextPrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.texts.push(text);
        }
    }

    pub fn push_gradient(&mut self, gradient: GradientPrimitive) {
        if let Some(existing) = self.gradients.iter_mut().find(|item| item.id == gradient.id) {
            *existing = gradient;
        } else {
            self.gradients.push(gradient);
        }
    }

    #[must_use]
    pub fn layer(&self, kind: GanttLayerKind) -> Option<&LayerPrimitives> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    #[must_use]
    pub fn flatten(&self) -> RenderFrame {
        self.flatten_layers(|_| true)
    }

    #[must_use]
    pub fn flatten_only(&self, include_layers: &[GanttLayerKind]) -> RenderFrame {
        self.flatten_layers(|kind| include_layers.contains(&kind))
    }

    fn flatten_layers(&self, include: impl Fn(GanttLayerKind) -> bool) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        frame.gradients.extend(self.gradients.iter().cloned());
        for layer in self.layers.iter().filter(|layer| include(layer.kind)) {
            frame.lines.extend(layer.lines.iter().copied());
            frame.rects.extend(layer.rects.iter().cloned());
            frame.paths.extend(layer.paths.iter().cloned());
            frame.texts.extend(layer.texts.iter().cloned());
        }
        frame
    }

    fn layer_mut(&mut self, kind: GanttLayerKind) -> Option<&mut LayerPrimitives> {
        self.layers.iter_mut().find(|layer| layer.kind == kind)
    }
}
