/// Normalizes a raw completion value into `[0, 1]`.
///
/// Values greater than 1 are treated as percentages on a 0-100 scale.
/// Non-finite values normalize to `None`.
#[must_use]
pub fn normalize_completion(raw: f64) -> Option<f64> {
    if !raw.is_finite() {
        return None;
    }
    let ratio = if raw > 1.0 { raw / 100.0 } else { raw };
    Some(ratio.clamp(0.0, 1.0))
}

/// Mean of the present child completions; 0 when none are present.
#[must_use]
pub fn group_completion<I>(children: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = children
        .into_iter()
        .flatten()
        .filter(|value| value.is_finite())
        .fold((0.0, 0_usize), |(sum, count), value| {
            (sum + value.clamp(0.0, 1.0), count + 1)
        });
    if count == 0 {
        0.0
    } else {
        (sum / count as f64).clamp(0.0, 1.0)
    }
}

#[must_use]
pub fn overlay_width(bar_width: f64, completion: f64) -> f64 {
    if !bar_width.is_finite() || !completion.is_finite() {
        return 0.0;
    }
    bar_width.max(0.0) * completion.clamp(0.0, 1.0)
}

#[must_use]
pub fn completion_label(completion: f64) -> String {
    format!("{}%", (completion.clamp(0.0, 1.0) * 100.0).round() as i64)
}
