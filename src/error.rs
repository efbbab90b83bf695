use std::path::PathBuf;

use palette::rgb::FromHexError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("File '{}' not found.", .0.display())]
    InputNotFound(PathBuf),

    #[error("could not open image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to save image: {0}")]
    Save(#[source] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid hex color '{0}': {1}")]
    Color(String, #[source] FromHexError),

    #[error("Invalid value '{value}' for {field}")]
    InvalidValue { field: &'static str, value: String },
}
