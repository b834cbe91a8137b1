mod frame;
mod layer_stack;
mod layered_frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use layer_stack::{GanttLayerKind, LayerStack};
pub use layered_frame::{LayerPrimitives, LayeredRenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, GradientPrimitive, LinePrimitive, LineStrokeStyle, PathCommand, PathCommands,
    PathPrimitive, RectPrimitive, TextHAlign, TextPrimitive, svg_path_data,
};

use crate::error::GanttResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from timeline logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> GanttResult<()>;
}
