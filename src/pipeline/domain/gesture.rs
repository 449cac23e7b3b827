use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureLabel {
    #[serde(rename = "Open Palm")]
    OpenPalm,
    #[serde(rename = "Fist")]
    Fist,
    #[serde(rename = "Pointing")]
    Pointing,
    #[serde(rename = "Peace Sign")]
    PeaceSign,
    #[serde(rename = "Thumbs Up")]
    ThumbsUp,
    #[serde(rename = "No Hand Detected")]
    NoHandDetected,
    #[serde(rename = "Hand Detected")]
    HandDetected,
}

impl GestureLabel {
    /// The named gestures, in the order they are scored and listed.
    pub const GESTURES: [GestureLabel; 5] = [
        GestureLabel::OpenPalm,
        GestureLabel::Fist,
        GestureLabel::Pointing,
        GestureLabel::PeaceSign,
        GestureLabel::ThumbsUp,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            GestureLabel::OpenPalm => "Open Palm",
            GestureLabel::Fist => "Fist",
            GestureLabel::Pointing => "Pointing",
            GestureLabel::PeaceSign => "Peace Sign",
            GestureLabel::ThumbsUp => "Thumbs Up",
            GestureLabel::NoHandDetected => "No Hand Detected",
            GestureLabel::HandDetected => "Hand Detected",
        }
    }

    /// False for the two sentinel labels.
    pub const fn is_gesture(&self) -> bool {
        !matches!(
            self,
            GestureLabel::NoHandDetected | GestureLabel::HandDetected
        )
    }

    /// What the user should do in front of the camera to produce this gesture.
    pub const fn instructions(&self) -> Option<&'static str> {
        match self {
            GestureLabel::OpenPalm => Some("Show your open hand to the camera"),
            GestureLabel::Fist => Some("Make a closed fist"),
            GestureLabel::Pointing => Some("Point with your index finger"),
            GestureLabel::PeaceSign => Some("Show two fingers in a V shape"),
            GestureLabel::ThumbsUp => Some("Give a thumbs up gesture"),
            GestureLabel::NoHandDetected | GestureLabel::HandDetected => None,
        }
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A label with its confidence, always an integer percentage.
///
/// Only built through [`Classification::new`], which caps the confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    label: GestureLabel,
    confidence: u8,
}

impl Classification {
    pub fn new(label: GestureLabel, confidence: u8) -> Self {
        Self {
            label,
            confidence: confidence.min(100),
        }
    }

    pub fn no_hand() -> Self {
        Self::new(GestureLabel::NoHandDetected, 0)
    }

    pub fn label(&self) -> GestureLabel {
        self.label
    }

    pub fn confidence(&self) -> u8 {
        self.confidence
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}%)", self.label, self.confidence)
    }
}
