use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Canvas {width}x{height} is too small to draw on")]
    CanvasTooSmall { width: u32, height: u32 },

    #[error("Failed to encode chart: {0}")]
    Encode(#[from] image::ImageError),
}

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Invalid seed JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid recipe {name:?}: {reason}")]
    InvalidRecipe { name: String, reason: String },

    #[error("Invalid {kind} {name:?}: {reason}")]
    InvalidEntry {
        kind: &'static str,
        name: String,
        reason: String,
    },
}
