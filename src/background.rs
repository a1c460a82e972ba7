use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use image::{ImageFormat, RgbaImage};

use crate::error::{MemeError, MemeResult};

// Static counter for generating unique IDs
static NEXT_IMAGE_ID: AtomicUsize = AtomicUsize::new(1);

/// Formats accepted as a meme background
pub const SUPPORTED_FORMATS: [ImageFormat; 3] = [ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::Gif];

/// A decoded background image. Shared by reference between the editor and
/// the surface; never mutated after decoding.
#[derive(Clone)]
pub struct BackgroundImage {
    id: usize,
    pixels: RgbaImage,
}

pub type ImageRef = Arc<BackgroundImage>;

impl std::fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("id", &self.id)
            .field("size", &self.size())
            .finish()
    }
}

impl BackgroundImage {
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        let id = NEXT_IMAGE_ID.fetch_add(1, Ordering::SeqCst);
        Self { id, pixels }
    }

    pub fn new_ref(pixels: RgbaImage) -> ImageRef {
        Arc::new(Self::from_rgba(pixels))
    }

    /// Decodes a JPEG, PNG or GIF from memory. The format is sniffed from the
    /// content; anything else is rejected before decoding.
    pub fn from_bytes(bytes: &[u8]) -> MemeResult<Self> {
        let format = image::guess_format(bytes)
            .map_err(|_| MemeError::UnsupportedImageType("unrecognized data".to_owned()))?;
        if !SUPPORTED_FORMATS.contains(&format) {
            return Err(MemeError::UnsupportedImageType(format!("{:?}", format)));
        }

        let decoded = image::load_from_memory_with_format(bytes, format).map_err(MemeError::ImageDecode)?;
        log::debug!("Decoded {:?} image: {}x{}", format, decoded.width(), decoded.height());
        Ok(Self::from_rgba(decoded.to_rgba8()))
    }

    pub fn open(path: &Path) -> MemeResult<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn size(&self) -> [u32; 2] {
        [self.pixels.width(), self.pixels.height()]
    }
}
