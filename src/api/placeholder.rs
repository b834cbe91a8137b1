use crate::core::Viewport;
use crate::render::{
    Color, GanttLayerKind, LayerStack, LayeredRenderFrame, RectPrimitive, TextHAlign,
    TextPrimitive,
};

use super::GanttTheme;

pub const PLACEHOLDER_TITLE: &str = "Gantt timeline: quick guide";

/// Field roles listed on the placeholder, grouped by section.
pub const PLACEHOLDER_SECTIONS: &[(&str, &[&str])] = &[
    (
        "Required fields",
        &[
            "Task (text): task name",
            "Parent (text): group or category",
            "Start date (date): start",
            "End date (date): end",
        ],
    ),
    (
        "Optional fields",
        &[
            "Secondary start/end (date): extra interval",
            "Duration (number): days or hours",
            "Predecessor (text): dependencies",
            "Completion (number or %): task progress",
        ],
    ),
    (
        "Extras",
        &[
            "Columns (text or number): additional fields",
            "Tooltips (any): hover details",
        ],
    ),
];

const TITLE_Y_PX: f64 = 50.0;
const FIRST_SECTION_Y_PX: f64 = 100.0;
const LINE_HEIGHT_PX: f64 = 24.0;
const SECTION_X_PX: f64 = 40.0;
const ITEM_X_PX: f64 = 60.0;

/// Informational frame drawn when there is no usable data.
#[must_use]
pub fn build_placeholder_frame(viewport: Viewport, theme: &GanttTheme) -> LayeredRenderFrame {
    let mut frame = LayeredRenderFrame::from_stack(viewport, LayerStack::canonical());
    let width = f64::from(viewport.width);
    frame.push_rect(
        GanttLayerKind::Placeholder,
        RectPrimitive::new(0.0, 0.0, width, f64::from(viewport.height), theme.background_color),
    );

    let font = theme.placeholder_font;
    frame.push_text(
        GanttLayerKind::Placeholder,
        TextPrimitive::new(
            PLACEHOLDER_TITLE,
            width / 2.0,
            TITLE_Y_PX,
            font.size_px * 1.8,
            font.color,
            TextHAlign::Center,
        )
        .with_emphasis(true, false),
    );

    let item_color = Color::rgb(0.33, 0.33, 0.33);
    let mut y = FIRST_SECTION_Y_PX;
    for (title, items) in PLACEHOLDER_SECTIONS {
        frame.push_text(
            GanttLayerKind::Placeholder,
            TextPrimitive::new(
                *title,
                SECTION_X_PX,
                y,
                font.size_px * 1.25,
                font.color,
                TextHAlign::Left,
            )
            .with_emphasis(true, false),
        );
        y += LINE_HEIGHT_PX;
        for item in *items {
            frame.push_text(
                GanttLayerKind::Placeholder,
                TextPrimitive::new(
                    *item,
                    ITEM_X_PX,
                    y,
                    font.size_px,
                    item_color,
                    TextHAlign::Left,
                ),
            );
            y += LINE_HEIGHT_PX;
        }
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::{PLACEHOLDER_SECTIONS, build_placeholder_frame};
    use crate::api::GanttTheme;
    use crate::core::Viewport;
    use crate::render::GanttLayerKind;

    #[test]
    fn placeholder_only_fills_its_own_layer() {
        let frame = build_placeholder_frame(Viewport::new(800, 600), &GanttTheme::default());
        let items: usize = PLACEHOLDER_SECTIONS.iter().map(|(_, items)| items.len()).sum();
        let placeholder = frame.layer(GanttLayerKind::Placeholder).expect("layer");
        assert_eq!(placeholder.texts.len(), 1 + PLACEHOLDER_SECTIONS.len() + items);
        let bars = frame.layer(GanttLayerKind::Bars).expect("layer");
        assert_eq!(bars.primitive_count(), 0);
    }
}
