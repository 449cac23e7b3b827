use crate::pipeline::domain::gesture::Classification;

// Markers to track the state of the frame processing pipeline
pub struct SampledState;
pub struct ClassifiedState {
    pub(super) classification: Classification,
}

pub trait ProcessingState: 'static {
    fn state_name() -> &'static str;
}

impl ProcessingState for SampledState {
    fn state_name() -> &'static str {
        "Sampled"
    }
}

impl ProcessingState for ClassifiedState {
    fn state_name() -> &'static str {
        "Classified"
    }
}
