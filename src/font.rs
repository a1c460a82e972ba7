use std::collections::BTreeMap;
use std::path::Path;

use ab_glyph::{Font, FontArc, FontVec, GlyphId, PxScale, ScaleFont};

use crate::error::{MemeError, MemeResult};

/// Family used when a style names a face the book does not know.
pub const DEFAULT_FAMILY: &str = "Proportional";
pub const MONOSPACE_FAMILY: &str = "Monospace";

/// Measures the rendered width of a single line of text.
pub trait TextMeasure {
    fn text_width(&self, text: &str, family: &str, size: f32) -> f32;
}

/// Named font faces used to measure and rasterize annotation text.
#[derive(Clone)]
pub struct FontBook {
    faces: BTreeMap<String, FontArc>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("families", &self.faces.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for FontBook {
    fn default() -> Self {
        Self::with_default_fonts()
    }
}

impl FontBook {
    pub fn empty() -> Self {
        Self {
            faces: BTreeMap::new(),
        }
    }

    /// Loads the faces embedded in egui, registered both under their own
    /// names and under the generic "Proportional" / "Monospace" families.
    pub fn with_default_fonts() -> Self {
        let definitions = egui::FontDefinitions::default();
        let mut book = Self::empty();

        for (name, data) in &definitions.font_data {
            match FontVec::try_from_vec_and_index(data.font.to_vec(), data.index) {
                Ok(face) => {
                    book.faces.insert(name.clone(), FontArc::new(face));
                }
                Err(err) => log::warn!("Skipping embedded font {}: {}", name, err),
            }
        }

        for (family, names) in &definitions.families {
            let alias = match family {
                egui::FontFamily::Proportional => DEFAULT_FAMILY,
                egui::FontFamily::Monospace => MONOSPACE_FAMILY,
                egui::FontFamily::Name(name) => name.as_ref(),
            };
            if let Some(face) = names.iter().find_map(|name| book.faces.get(name).cloned()) {
                book.faces.insert(alias.to_owned(), face);
            }
        }

        log::debug!("Font book ready with {} faces", book.faces.len());
        book
    }

    /// Registers a TrueType/OpenType face under `name`, replacing any face
    /// already registered with that name.
    pub fn register_bytes(&mut self, name: &str, bytes: Vec<u8>) -> MemeResult<()> {
        let face = FontVec::try_from_vec(bytes).map_err(|err| MemeError::FontLoad {
            name: name.to_owned(),
            reason: err.to_string(),
        })?;
        self.faces.insert(name.to_owned(), FontArc::new(face));
        log::info!("Registered font family {}", name);
        Ok(())
    }

    pub fn register_path(&mut self, name: &str, path: &Path) -> MemeResult<()> {
        let bytes = std::fs::read(path)?;
        self.register_bytes(name, bytes)
    }

    pub fn contains(&self, family: &str) -> bool {
        self.faces.contains_key(family)
    }

    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.faces.keys().map(String::as_str)
    }

    /// Looks up `family`, falling back to the default family and then to any
    /// registered face.
    pub fn face(&self, family: &str) -> Option<&FontArc> {
        self.faces
            .get(family)
            .or_else(|| self.faces.get(DEFAULT_FAMILY))
            .or_else(|| self.faces.values().next())
    }
}

impl TextMeasure for FontBook {
    fn text_width(&self, text: &str, family: &str, size: f32) -> f32 {
        let Some(face) = self.face(family) else {
            return 0.0;
        };
        let scaled = face.as_scaled(px_scale(face, size));

        let mut width = 0.0;
        let mut previous: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(previous) = previous {
                width += scaled.kern(previous, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        width
    }
}

/// Scale for a face such that one em equals `size` pixels, the way CSS
/// interprets a pixel font size.
pub fn px_scale(face: &FontArc, size: f32) -> PxScale {
    let units_per_em = face.units_per_em().unwrap_or(1000.0);
    PxScale::from(size * face.height_unscaled() / units_per_em)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_families_available() {
        let book = FontBook::with_default_fonts();
        assert!(book.contains(DEFAULT_FAMILY));
        assert!(book.contains(MONOSPACE_FAMILY));
        assert!(book.face(DEFAULT_FAMILY).is_some());
    }

    #[test]
    fn test_width_grows_with_text_and_size() {
        let book = FontBook::with_default_fonts();
        let short = book.text_width("MEME", DEFAULT_FAMILY, 20.0);
        let long = book.text_width("MEME MEME", DEFAULT_FAMILY, 20.0);
        let big = book.text_width("MEME", DEFAULT_FAMILY, 40.0);

        assert!(short > 0.0);
        assert!(long > short);
        assert!((big - short * 2.0).abs() < 1.0);
        assert_eq!(book.text_width("", DEFAULT_FAMILY, 20.0), 0.0);
    }

    #[test]
    fn test_unknown_family_falls_back() {
        let book = FontBook::with_default_fonts();
        let fallback = book.text_width("HELLO", "Impact", 30.0);
        let default = book.text_width("HELLO", DEFAULT_FAMILY, 30.0);
        assert_eq!(fallback, default);
        assert!(!book.contains("Impact"));
    }

    #[test]
    fn test_register_invalid_bytes_fails() {
        let mut book = FontBook::empty();
        let result = book.register_bytes("Broken", vec![0, 1, 2, 3]);
        assert!(matches!(result, Err(MemeError::FontLoad { .. })));
        assert!(!book.contains("Broken"));
    }

    #[test]
    fn test_empty_book_measures_zero() {
        let book = FontBook::empty();
        assert!(book.face(DEFAULT_FAMILY).is_none());
        assert_eq!(book.text_width("TEXT", DEFAULT_FAMILY, 20.0), 0.0);
    }
}
