use thiserror::Error;
use uuid::Uuid;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Frame Error: {0}")]
    Frame(#[from] FrameError),
    #[error("Source Error: {0}")]
    Source(#[from] SourceError),
    #[error("Configuration Error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Serialization Error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Pipeline Error: {0}")]
    Pipeline(String),
    #[error("UI Error: {0}")]
    Ui(String),
    #[error("Detection is already running.")]
    AlreadyStarted,
    #[error("Failed to classify {failed} of {total} file(s)")]
    ClassifyFailed { failed: usize, total: usize },
}

// Frame Error Type
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Pixel buffer of {actual} bytes does not fit a {width}x{height} frame")]
    InvalidBufferLength {
        width: u32,
        height: u32,
        actual: usize,
    },
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Frame source unavailable: {0}")]
    Unavailable(String),
    #[error("Failed to read frame from source {0}: {1}")]
    Read(Uuid, FrameError),
    #[error("Frame source {0} is not open")]
    NotOpen(Uuid),
}
