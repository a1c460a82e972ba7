use egui::{ColorImage, Vec2};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::background::BackgroundImage;

/// The background resized to the surface, kept until the image or the
/// surface size changes.
#[derive(Clone)]
struct ScaledBackground {
    image_id: usize,
    pixels: RgbaImage,
}

/// Fixed-size raster target the compositor draws into.
#[derive(Clone)]
pub struct Surface {
    pixels: RgbaImage,
    version: u64,
    scaled_background: Option<ScaledBackground>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("version", &self.version)
            .finish()
    }
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width.max(1), height.max(1)),
            version: 0,
            scaled_background: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32)
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut RgbaImage {
        &mut self.pixels
    }

    /// Incremented by every completed render.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn mark_rendered(&mut self) {
        self.version += 1;
    }

    pub fn clear(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    /// Draws `image` stretched over the whole surface, ignoring its aspect ratio.
    pub fn draw_background(&mut self, image: &BackgroundImage) {
        let (width, height) = self.pixels.dimensions();
        let stale = self.scaled_background.as_ref().is_none_or(|cached| {
            cached.image_id != image.id() || cached.pixels.dimensions() != (width, height)
        });

        if stale {
            log::debug!(
                "Scaling background {} from {:?} to {}x{}",
                image.id(),
                image.size(),
                width,
                height
            );
            self.scaled_background = Some(ScaledBackground {
                image_id: image.id(),
                pixels: imageops::resize(image.pixels(), width, height, FilterType::Triangle),
            });
        }

        if let Some(cached) = &self.scaled_background {
            imageops::overlay(&mut self.pixels, &cached.pixels, 0, 0);
        }
    }

    pub fn to_color_image(&self) -> ColorImage {
        let size = [self.width() as usize, self.height() as usize];
        ColorImage::from_rgba_unmultiplied(size, self.pixels.as_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_surface_is_transparent() {
        let surface = Surface::new(4, 3);
        assert_eq!(surface.size(), Vec2::new(4.0, 3.0));
        assert!(surface.pixels().pixels().all(|p| p[3] == 0));
        assert_eq!(surface.version(), 0);
    }

    #[test]
    fn test_background_is_stretched() {
        let mut surface = Surface::new(50, 20);
        let image = BackgroundImage::from_rgba(RgbaImage::from_pixel(2, 7, Rgba([200, 10, 10, 255])));
        surface.draw_background(&image);

        assert!(surface.pixels().pixels().all(|p| *p == Rgba([200, 10, 10, 255])));
    }

    #[test]
    fn test_background_swap_replaces_cache() {
        let mut surface = Surface::new(8, 8);
        let red = BackgroundImage::from_rgba(RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255])));
        let green = BackgroundImage::from_rgba(RgbaImage::from_pixel(2, 2, Rgba([0, 255, 0, 255])));

        surface.draw_background(&red);
        surface.clear();
        surface.draw_background(&green);
        assert_eq!(*surface.pixels().get_pixel(4, 4), Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn test_color_image_matches_size() {
        let surface = Surface::new(6, 5);
        let color_image = surface.to_color_image();
        assert_eq!(color_image.size, [6, 5]);
    }
}
