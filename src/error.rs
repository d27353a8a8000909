use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PhError>;

#[derive(Error, Debug)]
pub enum PhError {
    #[error("Invalid image: {reason}")]
    InvalidImage { reason: String },

    #[error("No pixels selected while sampling the {stage} region")]
    EmptyRegion { stage: String },

    #[error("Degenerate contour geometry: {reason}")]
    DegenerateGeometry { reason: String },

    #[error("Cannot remap channel {channel}: white reference {white} is not above black reference {black}")]
    DegenerateColorTransform { channel: usize, white: u8, black: u8 },

    #[error("Hue must be positive to estimate pH, got {hue}")]
    NonPositiveHue { hue: f64 },

    #[error("Debug directory is not empty: {}", path.display())]
    DebugDirNotEmpty { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl PhError {
    pub fn invalid_image(reason: impl Into<String>) -> Self {
        Self::InvalidImage { reason: reason.into() }
    }

    pub fn empty_region(stage: impl Into<String>) -> Self {
        Self::EmptyRegion { stage: stage.into() }
    }

    pub fn degenerate_geometry(reason: impl Into<String>) -> Self {
        Self::DegenerateGeometry { reason: reason.into() }
    }
}
