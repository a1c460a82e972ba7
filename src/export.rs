use std::io::Cursor;
use std::path::Path;

use image::ImageFormat;

use crate::error::{MemeError, MemeResult};
use crate::surface::Surface;

/// Encodes the surface as it currently is. Callers render first so the
/// pixels reflect the latest store state.
pub fn encode_png(surface: &Surface) -> MemeResult<Vec<u8>> {
    let mut bytes = Vec::new();
    surface
        .pixels()
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(MemeError::Encode)?;
    Ok(bytes)
}

pub fn save_png(surface: &Surface, path: &Path) -> MemeResult<()> {
    let bytes = encode_png(surface)?;
    std::fs::write(path, bytes)?;
    log::info!(
        "Exported {}x{} meme to {}",
        surface.width(),
        surface.height(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_decodes_to_surface_size() {
        let surface = Surface::new(32, 16);
        let bytes = encode_png(&surface).unwrap();

        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 16));
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meme.png");
        save_png(&Surface::new(8, 8), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("meme.png");
        assert!(matches!(save_png(&Surface::new(8, 8), &path), Err(MemeError::Io(_))));
    }
}
