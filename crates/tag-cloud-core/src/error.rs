use crate::model::Size;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagCloudError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "image")]
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid spiral step {step}: must be finite and greater than zero")]
    InvalidStep { step: f64 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("No free position for {size} after {attempts} candidate points")]
    AttemptsExhausted { attempts: u64, size: Size },
    #[error("No free position for {size} within radius {radius}")]
    RadiusExceeded { radius: f64, size: Size },
}

pub type Result<T> = std::result::Result<T, TagCloudError>;
