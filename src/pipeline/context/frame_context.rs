use crate::common::frame::Frame;
use crate::pipeline::context::metrics::FrameMetrics;
use crate::pipeline::context::state::{ClassifiedState, ProcessingState, SampledState};
use crate::pipeline::domain::gesture::Classification;
use std::sync::Arc;
use std::time::{Duration, Instant};

// FrameContext with compile-time state tracking through the state marker
pub struct FrameContext<S> {
    frame: Arc<Frame>,
    metrics: FrameMetrics,
    processing_start: Instant,
    state: S,
}

impl<S: ProcessingState> FrameContext<S> {
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn metrics(&self) -> &FrameMetrics {
        &self.metrics
    }

    pub fn elapsed(&self) -> Duration {
        self.processing_start.elapsed()
    }

    pub fn state_name(&self) -> &'static str {
        S::state_name()
    }
}

impl FrameContext<SampledState> {
    pub fn new(frame: Frame) -> Self {
        Self {
            frame: Arc::new(frame),
            metrics: FrameMetrics::new(),
            processing_start: Instant::now(),
            state: SampledState,
        }
    }

    pub fn into_classified(mut self, classification: Classification) -> FrameContext<ClassifiedState> {
        self.metrics.record_classification_duration(self.elapsed());
        FrameContext::<ClassifiedState> {
            frame: self.frame,
            metrics: self.metrics,
            processing_start: self.processing_start,
            state: ClassifiedState { classification },
        }
    }
}

impl FrameContext<ClassifiedState> {
    pub fn classification(&self) -> Classification {
        self.state.classification
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::domain::gesture::GestureLabel;
    use chrono::Utc;
    use image::DynamicImage;
    use uuid::Uuid;

    #[test]
    fn classifying_records_duration_and_keeps_frame() {
        let frame = Frame::new(
            Uuid::new_v4(),
            DynamicImage::new_rgb8(4, 4),
            Utc::now(),
            Uuid::new_v4(),
        );
        let frame_id = frame.frame_id();
        let sampled = FrameContext::new(frame);
        assert_eq!(sampled.state_name(), "Sampled");
        assert!(sampled.metrics().classification_duration().is_none());

        let classified = sampled.into_classified(Classification::new(GestureLabel::Fist, 75));
        assert_eq!(classified.state_name(), "Classified");
        assert_eq!(classified.frame().frame_id(), frame_id);
        assert_eq!(classified.classification().label(), GestureLabel::Fist);
        assert!(classified.metrics().classification_duration().is_some());
    }
}
