use crate::pipeline::domain::gesture::GestureLabel;

/// Below this skin ratio the frame is treated as empty.
pub const NO_HAND_RATIO: f64 = 0.05;

/// A winning score must exceed this to be reported as a gesture.
pub const MIN_GESTURE_SCORE: u8 = 50;

/// One row of the ratio table. Both bounds are exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    pub label: GestureLabel,
    pub lower: f64,
    pub upper: f64,
    pub score: u8,
}

impl Threshold {
    /// The fixed score when `ratio` falls inside the bounds, 0 otherwise.
    pub fn score(&self, ratio: f64) -> u8 {
        if ratio > self.lower && ratio < self.upper {
            self.score
        } else {
            0
        }
    }
}

/// Scan order matters: earlier rows win ties.
pub static THRESHOLD_TABLE: [Threshold; 5] = [
    Threshold {
        label: GestureLabel::OpenPalm,
        lower: 0.15,
        upper: f64::INFINITY,
        score: 85,
    },
    Threshold {
        label: GestureLabel::Fist,
        lower: 0.05,
        upper: 0.10,
        score: 75,
    },
    Threshold {
        label: GestureLabel::Pointing,
        lower: 0.04,
        upper: 0.08,
        score: 70,
    },
    Threshold {
        label: GestureLabel::PeaceSign,
        lower: 0.09,
        upper: 0.13,
        score: 65,
    },
    Threshold {
        label: GestureLabel::ThumbsUp,
        lower: 0.06,
        upper: 0.09,
        score: 60,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_follows_gesture_order() {
        let labels: Vec<_> = THRESHOLD_TABLE.iter().map(|t| t.label).collect();
        assert_eq!(labels, GestureLabel::GESTURES.to_vec());
    }

    #[test]
    fn bounds_are_exclusive() {
        let fist = &THRESHOLD_TABLE[1];
        assert_eq!(fist.score(0.05), 0);
        assert_eq!(fist.score(0.10), 0);
        assert_eq!(fist.score(0.07), 75);

        let open_palm = &THRESHOLD_TABLE[0];
        assert_eq!(open_palm.score(0.15), 0);
        assert_eq!(open_palm.score(1.0), 85);
    }
}
