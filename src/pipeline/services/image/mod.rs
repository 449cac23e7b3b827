pub mod gesture_classifier;
pub mod skin;
pub mod statistics;
pub mod thresholds;

pub use gesture_classifier::GestureClassifier;
pub use statistics::FrameStatistics;
