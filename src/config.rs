use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::MemeResult;
use crate::font::FontBook;
use crate::geometry::HitOrder;
use crate::style::TextStyle;

/// Environment variable naming a JSON configuration file.
pub const CONFIG_ENV_VAR: &str = "MEME_CANVAS_CONFIG";

/// An extra font face to register at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontFile {
    pub family: String,
    pub path: PathBuf,
}

/// Startup configuration. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub surface_width: u32,
    pub surface_height: u32,
    pub hit_order: HitOrder,
    pub fonts: Vec<FontFile>,
    /// Style used until the user changes it; a persisted style wins over this
    pub style: TextStyle,
    pub export_file_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            surface_width: 600,
            surface_height: 500,
            hit_order: HitOrder::default(),
            fonts: Vec::new(),
            style: TextStyle::default(),
            export_file_name: "meme.png".to_owned(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> MemeResult<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.style = config.style.sanitized();
        Ok(config)
    }

    pub fn load(path: &Path) -> MemeResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> MemeResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], falling back to defaults
    /// when the variable is unset or the file cannot be used.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        match Self::load(Path::new(&path)) {
            Ok(config) => config,
            Err(err) => {
                log::error!("Ignoring configuration {}: {}", Path::new(&path).display(), err);
                Self::default()
            }
        }
    }

    /// The embedded fonts plus every configured font file that loads.
    pub fn build_font_book(&self) -> FontBook {
        let mut book = FontBook::with_default_fonts();
        for font in &self.fonts {
            if let Err(err) = book.register_path(&font.family, &font.path) {
                log::error!("Skipping font {}: {}", font.path.display(), err);
            }
        }
        book
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MemeError;
    use egui::Color32;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EditorConfig::from_json(r#"{ "surface_width": 800, "hit_order": "Topmost" }"#).unwrap();
        assert_eq!(config.surface_width, 800);
        assert_eq!(config.surface_height, 500);
        assert_eq!(config.hit_order, HitOrder::Topmost);
        assert_eq!(config.export_file_name, "meme.png");
    }

    #[test]
    fn test_out_of_range_style_is_clamped() {
        let config = EditorConfig::from_json(r#"{ "style": { "font_size": -40.0 } }"#).unwrap();
        assert_eq!(config.style.font_size, crate::style::MIN_FONT_SIZE);

        let config = EditorConfig::from_json(r#"{ "style": { "font_size": 4000.0 } }"#).unwrap();
        assert_eq!(config.style.font_size, crate::style::MAX_FONT_SIZE);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(EditorConfig::from_json("{ nope"), Err(MemeError::Config(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = EditorConfig::default();
        config.style = config.style.with_fill_color(Color32::RED).with_font_size(64.0);
        config.fonts.push(FontFile {
            family: "Impact".into(),
            path: "/fonts/impact.ttf".into(),
        });

        config.save(&path).unwrap();
        assert_eq!(EditorConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = EditorConfig::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(MemeError::Io(_))));
    }

    #[test]
    fn test_bad_font_file_is_skipped() {
        let config = EditorConfig {
            fonts: vec![FontFile {
                family: "Missing".into(),
                path: "/definitely/not/a/font.ttf".into(),
            }],
            ..Default::default()
        };
        let book = config.build_font_book();
        assert!(!book.contains("Missing"));
        assert!(book.contains(crate::font::DEFAULT_FAMILY));
    }
}
