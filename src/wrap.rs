//! Greedy word wrapping and vertical placement of wrapped lines.

use egui::Pos2;

/// A laid out line of text. `baseline.x` is the horizontal center of the
/// line and `baseline.y` its alphabetic baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub baseline: Pos2,
}

/// Splits `text` into lines no wider than `max_width`, as measured by
/// `measure`.
///
/// A candidate line is measured with a trailing space. A word that does not
/// fit on its own still gets a line to itself; words are never split. Empty
/// text yields a single empty line.
pub fn wrap_lines(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = format!("{line}{word} ");
        if measure(&candidate) > max_width && !line.is_empty() {
            lines.push(line.trim_end().to_owned());
            line = format!("{word} ");
        } else {
            line = candidate;
        }
    }
    lines.push(line.trim_end().to_owned());

    lines
}

/// Places the baselines of `lines` one `line_height` apart so the block of
/// baselines is centered on `anchor.y`; every line is horizontally centered
/// on `anchor.x`.
pub fn layout_lines(lines: Vec<String>, anchor: Pos2, line_height: f32) -> Vec<PlacedLine> {
    let total_height = lines.len() as f32 * line_height;
    let first_y = anchor.y - total_height / 2.0 + line_height / 2.0;

    lines
        .into_iter()
        .enumerate()
        .map(|(i, text)| PlacedLine {
            text,
            baseline: Pos2::new(anchor.x, first_y + i as f32 * line_height),
        })
        .collect()
}
