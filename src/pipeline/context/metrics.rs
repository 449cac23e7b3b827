use std::time::Duration;

/// Metrics collected during frame processing
#[derive(Debug, Clone, Default)]
pub struct FrameMetrics {
    classification_duration: Option<Duration>,
}

impl FrameMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_classification_duration(&mut self, duration: Duration) {
        self.classification_duration = Some(duration);
    }

    pub fn classification_duration(&self) -> Option<Duration> {
        self.classification_duration
    }
}
