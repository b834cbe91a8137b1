/// Deterministic text width estimate, independent of any font backend.
pub(super) fn estimate_label_text_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' | ':' | '/' => 0.34,
            '-' | '+' | '%' | '(' | ')' => 0.42,
            ' ' => 0.33,
            'A'..='Z' => 0.68,
            _ => 0.56,
        }
    });
    (units * font_size_px).max(font_size_px)
}

/// Lays items left to right from `start_x`, each `width + gap` apart.
///
/// Items that would start past `max_x` are dropped.
pub(super) fn flow_left_to_right(
    widths: impl IntoIterator<Item = f64>,
    start_x: f64,
    gap_px: f64,
    max_x: f64,
) -> Vec<f64> {
    let mut x = start_x;
    let mut positions = Vec::new();
    for width in widths {
        if x >= max_x {
            break;
        }
        positions.push(x);
        x += width + gap_px;
    }
    positions
}
