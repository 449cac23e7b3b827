pub mod context;
pub mod domain;
pub mod orchestration;
pub mod services;

pub use context::FrameContext;
pub use domain::{Classification, DetectionSnapshot, GestureLabel};
