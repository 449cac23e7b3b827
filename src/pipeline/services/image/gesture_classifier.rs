use image::DynamicImage;
use tracing::trace;

use crate::common::Frame;
use crate::pipeline::domain::gesture::{Classification, GestureLabel};
use crate::pipeline::services::image::statistics::FrameStatistics;
use crate::pipeline::services::image::thresholds::{
    MIN_GESTURE_SCORE, NO_HAND_RATIO, THRESHOLD_TABLE,
};

/// Maps a frame to a gesture from its skin-pixel ratio alone.
///
/// Stateless: the same frame always yields the same classification.
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureClassifier;

impl GestureClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, frame: &Frame) -> Classification {
        self.classify_image(frame.image())
    }

    pub fn classify_image(&self, image: &DynamicImage) -> Classification {
        let statistics = FrameStatistics::collect(image);
        let classification = self.decide(&statistics);
        trace!(
            skin_pixels = statistics.skin_pixels,
            total_pixels = statistics.total_pixels,
            center_of_mass = ?statistics.center_of_mass,
            average_brightness = statistics.average_brightness,
            %classification,
            "Classified frame"
        );
        classification
    }

    pub fn decide(&self, statistics: &FrameStatistics) -> Classification {
        match statistics.skin_ratio() {
            Some(ratio) => self.classify_ratio(ratio),
            None => Classification::no_hand(),
        }
    }

    pub fn classify_ratio(&self, skin_ratio: f64) -> Classification {
        if skin_ratio < NO_HAND_RATIO {
            return Classification::no_hand();
        }

        // Highest score wins; only a strictly higher score replaces the leader.
        let mut best = &THRESHOLD_TABLE[0];
        let mut best_score = best.score(skin_ratio);
        for threshold in &THRESHOLD_TABLE {
            let score = threshold.score(skin_ratio);
            if score > best_score {
                best = threshold;
                best_score = score;
            }
        }

        if best_score > MIN_GESTURE_SCORE {
            Classification::new(best.label, best_score)
        } else {
            let confidence = (skin_ratio * 100.0).round().clamp(0.0, 100.0) as u8;
            Classification::new(GestureLabel::HandDetected, confidence)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, RgbImage};

    const SKIN: Rgb<u8> = Rgb([200, 140, 110]);
    const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

    /// 100x100 frame whose first `skin` pixels (row-major) are skin coloured.
    fn frame_with_skin_pixels(skin: u32) -> DynamicImage {
        let image: RgbImage = ImageBuffer::from_fn(100, 100, |x, y| {
            if y * 100 + x < skin {
                SKIN
            } else {
                BLUE
            }
        });
        DynamicImage::ImageRgb8(image)
    }

    fn classify(skin: u32) -> (GestureLabel, u8) {
        let classification = GestureClassifier::new().classify_image(&frame_with_skin_pixels(skin));
        (classification.label(), classification.confidence())
    }

    #[test]
    fn sparse_skin_is_no_hand() {
        assert_eq!(classify(0), (GestureLabel::NoHandDetected, 0));
        assert_eq!(classify(300), (GestureLabel::NoHandDetected, 0));
        assert_eq!(classify(499), (GestureLabel::NoHandDetected, 0));
    }

    #[test]
    fn full_skin_is_open_palm() {
        assert_eq!(classify(10_000), (GestureLabel::OpenPalm, 85));
    }

    #[test]
    fn twelve_percent_is_peace_sign() {
        assert_eq!(classify(1_200), (GestureLabel::PeaceSign, 65));
    }

    #[test]
    fn overlapping_ranges_pick_highest_score() {
        // Fist, Pointing and Thumbs Up all hold at 0.065.
        assert_eq!(classify(650), (GestureLabel::Fist, 75));
        // Fist and Peace Sign both hold at 0.095.
        assert_eq!(classify(950), (GestureLabel::Fist, 75));
    }

    #[test]
    fn exact_no_hand_boundary_falls_through_to_table() {
        // 0.05 is not below the cut-off and lies inside the Pointing range only.
        assert_eq!(classify(500), (GestureLabel::Pointing, 70));
    }

    #[test]
    fn unscored_ratio_reports_hand_detected() {
        assert_eq!(classify(1_300), (GestureLabel::HandDetected, 13));
        assert_eq!(classify(1_400), (GestureLabel::HandDetected, 14));
        assert_eq!(classify(1_500), (GestureLabel::HandDetected, 15));
    }

    #[test]
    fn hand_detected_confidence_is_rounded() {
        let classifier = GestureClassifier::new();
        assert_eq!(
            classifier.classify_ratio(0.1349),
            Classification::new(GestureLabel::HandDetected, 13)
        );
        assert_eq!(
            classifier.classify_ratio(0.1375),
            Classification::new(GestureLabel::HandDetected, 14)
        );
    }

    #[test]
    fn range_edges() {
        let classifier = GestureClassifier::new();
        assert_eq!(classifier.classify_ratio(0.09).label(), GestureLabel::Fist);
        assert_eq!(classifier.classify_ratio(0.10).label(), GestureLabel::PeaceSign);
        assert_eq!(classifier.classify_ratio(0.151).label(), GestureLabel::OpenPalm);
    }

    #[test]
    fn empty_frame_is_no_hand() {
        let classification = GestureClassifier::new().classify_image(&DynamicImage::new_rgb8(0, 0));
        assert_eq!(classification, Classification::no_hand());
    }

    #[test]
    fn classification_is_idempotent() {
        let classifier = GestureClassifier::new();
        let image = frame_with_skin_pixels(777);
        assert_eq!(classifier.classify_image(&image), classifier.classify_image(&image));
    }
}
