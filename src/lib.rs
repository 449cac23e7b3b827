pub mod app;
pub mod cli;
pub mod common;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod intake;
pub mod pipeline;

pub use common::Frame;
pub use coordinator::{Coordinator, CoordinatorBuilder};
pub use error::{AppError, FrameError, SourceError};
pub use pipeline::domain::gesture::{Classification, GestureLabel};
pub use pipeline::services::image::gesture_classifier::GestureClassifier;
