pub mod catalogue_view;
pub mod gesture_view;

pub trait View {
    fn draw(&mut self, ui: &mut egui::Ui);
}
