use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::pipeline::context::{ClassifiedState, FrameContext};
use crate::pipeline::domain::gesture::{Classification, GestureLabel};

/// Label shown while detection is stopped or before the first tick.
pub const IDLE_LABEL: &str = "None";

/// Running totals for one detection session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickTally {
    pub classified: u64,
    pub skipped: u64,
}

impl TickTally {
    pub fn total(&self) -> u64 {
        self.classified + self.skipped
    }
}

/// Immutable view of the detector handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionSnapshot {
    pub active: bool,
    pub classification: Option<Classification>,
    pub frame_id: Option<Uuid>,
    pub tally: TickTally,
    pub published_at: DateTime<Utc>,
}

impl DetectionSnapshot {
    /// Detection stopped; the tally of the finished session is kept.
    pub fn idle(tally: TickTally) -> Self {
        Self {
            active: false,
            classification: None,
            frame_id: None,
            tally,
            published_at: Utc::now(),
        }
    }

    /// Detection running, no frame classified yet.
    pub fn started() -> Self {
        Self {
            active: true,
            ..Self::idle(TickTally::default())
        }
    }

    pub fn classified(context: &FrameContext<ClassifiedState>, tally: TickTally) -> Self {
        Self {
            active: true,
            classification: Some(context.classification()),
            frame_id: Some(context.frame().frame_id()),
            tally,
            published_at: Utc::now(),
        }
    }

    /// Same result as `self` with an updated tally, published for skipped ticks.
    pub fn with_tally(&self, tally: TickTally) -> Self {
        Self {
            tally,
            published_at: Utc::now(),
            ..self.clone()
        }
    }

    pub fn label(&self) -> Option<GestureLabel> {
        self.classification.map(|c| c.label())
    }

    pub fn display_label(&self) -> &'static str {
        self.label().map(|l| l.as_str()).unwrap_or(IDLE_LABEL)
    }

    pub fn confidence(&self) -> u8 {
        self.classification.map(|c| c.confidence()).unwrap_or(0)
    }
}

impl Default for DetectionSnapshot {
    fn default() -> Self {
        Self::idle(TickTally::default())
    }
}
