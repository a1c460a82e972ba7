use std::path::PathBuf;

use eframe::egui;

use crate::error::{MemeError, MemeResult};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// An image file picked or dropped by the user, read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct PickedImage {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Brings image files into the editor (drag and drop, open dialog) and asks
/// where exports should go.
#[derive(Debug, Default)]
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks up any files dropped this frame.
    /// Returns true if there is something to process.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                self.dropped_files = i.raw.dropped_files.clone();
            }
        });
        !self.dropped_files.is_empty()
    }

    /// Reads the first dropped image file, discarding the rest of the drop.
    pub fn take_dropped_image(&mut self) -> Option<MemeResult<PickedImage>> {
        let files = std::mem::take(&mut self.dropped_files);
        if files.len() > 1 {
            log::info!("{} files dropped, using the first image", files.len());
        }

        let mut rejected = None;
        for file in &files {
            let name = display_name(file);
            if is_image_file(file) {
                return Some(read_dropped_file(file).map(|bytes| PickedImage { name, bytes }));
            }
            log::warn!("Dropped file is not a supported type: {}", name);
            rejected.get_or_insert(name);
        }
        rejected.map(|name| Err(MemeError::UnsupportedImageType(name)))
    }

    /// Shows the native open dialog filtered to supported images.
    pub fn pick_image(&self) -> Option<MemeResult<PickedImage>> {
        let path = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()?;
        log::info!("Opening image {}", path.display());
        let name = path.display().to_string();
        Some(std::fs::read(&path).map(|bytes| PickedImage { name, bytes }).map_err(MemeError::from))
    }

    /// Shows the native save dialog for a PNG export.
    pub fn pick_export_path(&self, default_name: &str) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name(default_name)
            .save_file()
    }

    /// Dims the window while files are hovered over it.
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            "Drop an image to use as background",
            egui::FontId::proportional(24.0),
            Color32::WHITE,
        );
    }
}

fn display_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// Check if a file is an image based on MIME type or extension
pub fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }
    let name = match &file.path {
        Some(path) => path.to_string_lossy().into_owned(),
        None => file.name.clone(),
    };
    match name.rsplit_once('.') {
        Some((_, ext)) => IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}

/// In-memory bytes win over the path; a path is read from disk.
pub fn read_dropped_file(file: &egui::DroppedFile) -> MemeResult<Vec<u8>> {
    if let Some(bytes) = &file.bytes {
        log::info!("Processing image from memory: {} ({} bytes)", display_name(file), bytes.len());
        return Ok(bytes.to_vec());
    }
    match &file.path {
        Some(path) => {
            log::info!("Processing image from path: {}", path.display());
            Ok(std::fs::read(path)?)
        }
        None => Err(MemeError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("dropped file {} has no accessible data", display_name(file)),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn dropped(name: &str, mime: &str, bytes: Option<&[u8]>) -> egui::DroppedFile {
        egui::DroppedFile {
            name: name.to_owned(),
            mime: mime.to_owned(),
            bytes: bytes.map(Arc::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_image_detection() {
        assert!(is_image_file(&dropped("cat.PNG", "", None)));
        assert!(is_image_file(&dropped("whatever", "image/jpeg", None)));
        assert!(!is_image_file(&dropped("notes.txt", "", None)));
        assert!(!is_image_file(&dropped("cat.png", "text/plain", None)));
        assert!(!is_image_file(&dropped("README", "", None)));
    }

    #[test]
    fn test_read_prefers_bytes() {
        let file = dropped("cat.png", "", Some(&[1, 2, 3]));
        assert_eq!(read_dropped_file(&file).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_read_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cat.png");
        std::fs::write(&path, [9, 9]).unwrap();
        let file = egui::DroppedFile {
            path: Some(path),
            ..Default::default()
        };
        assert_eq!(read_dropped_file(&file).unwrap(), vec![9, 9]);
    }

    #[test]
    fn test_file_without_data_is_an_error() {
        assert!(read_dropped_file(&dropped("cat.png", "", None)).is_err());
    }

    #[test]
    fn test_take_dropped_image_uses_first_image() {
        let mut handler = FileHandler::new();
        handler.dropped_files = vec![
            dropped("notes.txt", "", Some(b"hello")),
            dropped("a.png", "", Some(&[1])),
            dropped("b.png", "", Some(&[2])),
        ];

        let picked = handler.take_dropped_image().unwrap().unwrap();
        assert_eq!(picked.name, "a.png");
        assert_eq!(picked.bytes, vec![1]);
        assert!(handler.take_dropped_image().is_none());
    }

    #[test]
    fn test_take_dropped_non_image_is_rejected() {
        let mut handler = FileHandler::new();
        handler.dropped_files = vec![dropped("notes.txt", "", Some(b"hello"))];

        assert!(matches!(
            handler.take_dropped_image(),
            Some(Err(MemeError::UnsupportedImageType(name))) if name == "notes.txt"
        ));
    }
}
