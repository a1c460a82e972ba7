use thiserror::Error;

/// Errors raised by the collaborators around the editor core
/// (image intake, fonts, export and configuration).
///
/// Store operations never produce these; invalid edits are silent no-ops.
#[derive(Debug, Error)]
pub enum MemeError {
    #[error("Failed to decode image: {0}")]
    ImageDecode(#[source] image::ImageError),

    #[error("Unsupported image type: {0} (expected JPEG, PNG or GIF)")]
    UnsupportedImageType(String),

    #[error("Failed to load font '{name}': {reason}")]
    FontLoad { name: String, reason: String },

    #[error("Failed to encode surface: {0}")]
    Encode(#[source] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for collaborator operations
pub type MemeResult<T> = Result<T, MemeError>;
