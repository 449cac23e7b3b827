use egui::{Color32, RichText};

use crate::app::views::View;
use crate::pipeline::domain::gesture::GestureLabel;
use crate::pipeline::domain::snapshot::DetectionSnapshot;

/// Glyph drawn above the label, and whether it is drawn dimmed.
pub fn gesture_glyph(label: Option<GestureLabel>) -> (&'static str, bool) {
    match label {
        Some(GestureLabel::OpenPalm) => ("✋", false),
        Some(GestureLabel::Fist) => ("✊", false),
        Some(GestureLabel::Pointing) => ("👉", false),
        Some(GestureLabel::PeaceSign) => ("✌", false),
        Some(GestureLabel::ThumbsUp) => ("👍", false),
        _ => ("✋", true),
    }
}

/// The detected gesture with its confidence bar.
pub struct GestureView<'a> {
    snapshot: &'a DetectionSnapshot,
}

impl<'a> GestureView<'a> {
    pub fn new(snapshot: &'a DetectionSnapshot) -> Self {
        Self { snapshot }
    }

    fn draw_confidence(&self, ui: &mut egui::Ui) {
        let confidence = self.snapshot.confidence();
        // The bar is hidden at zero confidence.
        if confidence == 0 {
            return;
        }
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("Confidence");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("{}%", confidence));
            });
        });
        ui.add(
            egui::ProgressBar::new(confidence as f32 / 100.0)
                .fill(Color32::from_rgb(139, 92, 246)),
        );
    }
}

impl View for GestureView<'_> {
    fn draw(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.heading("Detected Gesture");
            ui.vertical_centered(|ui| {
                let (glyph, dimmed) = gesture_glyph(self.snapshot.label());
                let color = if dimmed {
                    Color32::from_white_alpha(76)
                } else {
                    Color32::WHITE
                };
                ui.label(RichText::new(glyph).size(64.0).color(color));
                ui.label(
                    RichText::new(self.snapshot.display_label())
                        .size(30.0)
                        .strong(),
                );
            });
            self.draw_confidence(ui);

            if self.snapshot.active {
                ui.add_space(4.0);
                ui.small(format!(
                    "Ticks classified: {} · skipped: {}",
                    self.snapshot.tally.classified, self.snapshot.tally.skipped
                ));
            }
        });
    }
}
