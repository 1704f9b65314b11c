//! Text formatting for tooltips and labels.

/// Format a number as an integer with comma thousands separators.
///
/// Values are rounded half away from zero; non-finite values yield `"0"`.
/// This differs from d3 v3's `format(",d")`, which prints an empty string
/// for non-integers (so `83.2` reads `"83"` here instead of `""`).
///
/// ```
/// use bubble_chart::format::format_thousands;
///
/// assert_eq!(format_thousands(1234567.0), "1,234,567");
/// assert_eq!(format_thousands(-999.6), "-1,000");
/// ```
#[must_use]
pub fn format_thousands(value: f64) -> String {
    let rounded = if value.is_finite() { value.round() } else { 0.0 };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// First `max_chars` characters of `text`.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Number of label characters that fit a bubble of radius `r` (`floor(r / 5)`).
#[must_use]
pub fn label_capacity(r: f64) -> usize {
    if r.is_finite() && r > 0.0 {
        (r / 5.0).floor() as usize
    } else {
        0
    }
}
