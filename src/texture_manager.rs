use egui::{Context, TextureHandle, TextureId, TextureOptions};

use crate::surface::Surface;

const SURFACE_TEXTURE_NAME: &str = "meme_surface";

/// Keeps the GPU copy of the surface in step with its pixels, uploading only
/// when the surface has been re-rendered since the last upload.
#[derive(Default)]
pub struct TextureManager {
    handle: Option<TextureHandle>,
    uploaded_version: Option<u64>,
    uploads: u64,
}

impl std::fmt::Debug for TextureManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureManager")
            .field("uploaded_version", &self.uploaded_version)
            .field("uploads", &self.uploads)
            .finish()
    }
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the texture showing the current surface.
    pub fn sync(&mut self, ctx: &Context, surface: &Surface) -> TextureId {
        if self.uploaded_version == Some(surface.version()) {
            if let Some(handle) = &self.handle {
                return handle.id();
            }
        }

        let image = surface.to_color_image();
        let id = match &mut self.handle {
            Some(handle) => {
                handle.set(image, TextureOptions::LINEAR);
                handle.id()
            }
            None => {
                let handle = ctx.load_texture(SURFACE_TEXTURE_NAME, image, TextureOptions::LINEAR);
                let id = handle.id();
                self.handle = Some(handle);
                id
            }
        };

        self.uploaded_version = Some(surface.version());
        self.uploads += 1;
        log::trace!("Uploaded surface version {}", surface.version());
        id
    }

    /// Number of uploads performed so far
    pub fn upload_count(&self) -> u64 {
        self.uploads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::BackgroundImage;
    use crate::compositor::Compositor;
    use crate::layer::TextLayerStore;
    use crate::style::TextStyle;
    use image::RgbaImage;

    #[test]
    fn test_unchanged_surface_is_not_reuploaded() {
        let ctx = Context::default();
        let mut manager = TextureManager::new();
        let surface = Surface::new(10, 10);

        let first = manager.sync(&ctx, &surface);
        let second = manager.sync(&ctx, &surface);

        assert_eq!(first, second);
        assert_eq!(manager.upload_count(), 1);
    }

    #[test]
    fn test_render_triggers_upload_into_same_texture() {
        let ctx = Context::default();
        let mut manager = TextureManager::new();
        let mut surface = Surface::new(10, 10);
        let store = TextLayerStore::new(surface.size());
        let background = BackgroundImage::from_rgba(RgbaImage::new(2, 2));

        let first = manager.sync(&ctx, &surface);
        Compositor::default().render(&mut surface, &store, Some(&background), &TextStyle::default());
        let second = manager.sync(&ctx, &surface);

        assert_eq!(first, second);
        assert_eq!(manager.upload_count(), 2);
    }
}
