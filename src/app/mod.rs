pub mod detector_app;
pub mod views;

pub use detector_app::DetectorApp;
