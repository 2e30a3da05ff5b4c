use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, AvatarError>;

#[derive(Debug, thiserror::Error)]
pub enum AvatarError {
    #[error("Failed to read config '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config '{}': {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("Failed to serialize config '{}': {message}", path.display())]
    ConfigWrite { path: PathBuf, message: String },

    #[error("Invalid color '{0}': expected #rrggbb or #aarrggbb")]
    InvalidColor(String),

    #[error("Failed to parse SVG '{label}': {message}")]
    Svg { label: String, message: String },

    #[error("Failed to decode image '{}': {source}", path.display())]
    ImageDecode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to allocate {width}x{height} raster for '{label}'")]
    Allocation {
        label: String,
        width: u32,
        height: u32,
    },
}
