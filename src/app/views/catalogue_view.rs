use egui::{Color32, RichText, Stroke};

use crate::app::views::View;
use crate::pipeline::domain::gesture::GestureLabel;

/// Lists the supported gestures, highlighting the one currently detected.
pub struct CatalogueView {
    current: Option<GestureLabel>,
}

impl CatalogueView {
    pub fn new(current: Option<GestureLabel>) -> Self {
        Self { current }
    }

    pub fn is_highlighted(&self, label: GestureLabel) -> bool {
        self.current == Some(label)
    }
}

impl View for CatalogueView {
    fn draw(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.heading("Supported Gestures");
            for label in GestureLabel::GESTURES {
                let (fill, stroke) = if self.is_highlighted(label) {
                    (
                        Color32::from_rgba_unmultiplied(168, 85, 247, 76),
                        Stroke::new(1.0, Color32::from_rgb(192, 132, 252)),
                    )
                } else {
                    (
                        Color32::from_white_alpha(12),
                        Stroke::new(1.0, Color32::from_white_alpha(25)),
                    )
                };
                egui::Frame::group(ui.style())
                    .fill(fill)
                    .stroke(stroke)
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(RichText::new(label.as_str()).strong());
                        if let Some(instructions) = label.instructions() {
                            ui.small(instructions);
                        }
                    });
            }
        });
    }
}
