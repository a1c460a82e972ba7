use egui::Color32;
use serde::{Deserialize, Serialize};

/// Outline drawn around every glyph for legibility over arbitrary backgrounds.
pub const OUTLINE_COLOR: Color32 = Color32::BLACK;
pub const OUTLINE_WIDTH: f32 = 1.0;

/// Rectangle drawn around the selected annotation.
pub const HIGHLIGHT_COLOR: Color32 = Color32::YELLOW;
pub const HIGHLIGHT_WIDTH: f32 = 2.0;
pub const HIGHLIGHT_PADDING: f32 = 10.0;
/// How far the highlight sits above the measured text box, so that it
/// encloses capitals standing on the baseline.
pub const HIGHLIGHT_RISE: f32 = 15.0;

/// Horizontal margin kept free on each side when wrapping text.
pub const WRAP_MARGIN: f32 = 20.0;

pub const MIN_FONT_SIZE: f32 = 10.0;
pub const MAX_FONT_SIZE: f32 = 120.0;

/// Style applied uniformly to every annotation at render time.
///
/// The font size doubles as the line height of wrapped text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub fill_color: Color32,
    pub outline_color: Color32,
    pub outline_width: f32,
    pub font_family: String,
    pub font_size: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            fill_color: Color32::WHITE,
            outline_color: OUTLINE_COLOR,
            outline_width: OUTLINE_WIDTH,
            font_family: crate::font::DEFAULT_FAMILY.to_owned(),
            font_size: 40.0,
        }
    }
}

impl TextStyle {
    pub fn line_height(&self) -> f32 {
        self.font_size
    }

    /// Maximum width of a wrapped line on a surface of the given width.
    pub fn max_line_width(&self, surface_width: f32) -> f32 {
        (surface_width - 2.0 * WRAP_MARGIN).max(0.0)
    }

    pub fn with_fill_color(mut self, color: Color32) -> Self {
        self.fill_color = color;
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        self
    }

    /// Brings values read from config files or app storage back into range:
    /// the font size is clamped and the outline width is never negative.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.font_size.is_finite() {
            self.font_size = defaults.font_size;
        }
        if !self.outline_width.is_finite() {
            self.outline_width = defaults.outline_width;
        }
        self.outline_width = self.outline_width.max(0.0);
        let font_size = self.font_size;
        self.with_font_size(font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_outline_is_fixed() {
        let style = TextStyle::default();
        assert_eq!(style.outline_color, Color32::BLACK);
        assert_eq!(style.outline_width, 1.0);
    }

    #[test]
    fn test_font_size_is_clamped() {
        let style = TextStyle::default().with_font_size(500.0);
        assert_eq!(style.font_size, MAX_FONT_SIZE);
        assert_eq!(style.line_height(), MAX_FONT_SIZE);
    }

    #[test]
    fn test_sanitized_restores_ranges() {
        let style: TextStyle =
            serde_json::from_str(r#"{ "font_size": -40.0, "outline_width": -3.0 }"#).unwrap();
        let style = style.sanitized();
        assert_eq!(style.font_size, MIN_FONT_SIZE);
        assert_eq!(style.outline_width, 0.0);

        let mut style = TextStyle::default();
        style.font_size = f32::NAN;
        assert_eq!(style.sanitized().font_size, TextStyle::default().font_size);
    }

    #[test]
    fn test_max_line_width_leaves_margins() {
        let style = TextStyle::default();
        assert_eq!(style.max_line_width(600.0), 560.0);
        assert_eq!(style.max_line_width(10.0), 0.0);
    }
}
