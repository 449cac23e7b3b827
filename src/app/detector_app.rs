use std::sync::Arc;

use crate::config::{Settings, SourceKind, SourceSettings};
use crate::coordinator::{Coordinator, CoordinatorBuilder};
use crate::error::AppError;
use crate::intake::source::{self, FrameSource, SyntheticSource};
use crate::pipeline::domain::snapshot::{DetectionSnapshot, TickTally};
use egui::{Color32, RichText};
use tokio::runtime::Handle;
use tokio::sync::mpsc::error::TryRecvError as MpscTryRecvError;
use tokio::sync::{Mutex, mpsc, watch};
use tracing::{error, info};

use crate::app::views::{View, catalogue_view::CatalogueView, gesture_view::GestureView};

const WINDOW_TITLE: &str = "Hand Gesture Detector";

const HOW_TO_USE: [&str; 4] = [
    "Click \"Start Detection\" to activate the frame source",
    "Position your hand clearly in front of the camera",
    "Try different hand gestures and see them detected in real-time",
    "Make sure you have good lighting for best results",
];

pub enum UiUpdate {
    Started,
    Stopped(TickTally),
    Failed(String),
}

pub struct DetectorApp {
    runtime: Handle,
    coordinator: Arc<Mutex<Coordinator>>,
    snapshot_rx: watch::Receiver<DetectionSnapshot>,
    source_settings: SourceSettings,
    skin_ratio: f64,
    skin_ratio_tx: Option<watch::Sender<f64>>,
    ui_update_rx: mpsc::Receiver<UiUpdate>,
    ui_update_tx: mpsc::Sender<UiUpdate>,
    pending: bool,
    error: Option<String>,
}

impl DetectorApp {
    pub fn new(runtime: Handle, coordinator: Coordinator, source_settings: SourceSettings) -> Self {
        let (ui_update_tx, ui_update_rx) = mpsc::channel::<UiUpdate>(16);
        Self {
            runtime,
            snapshot_rx: coordinator.subscribe(),
            coordinator: Arc::new(Mutex::new(coordinator)),
            skin_ratio: source_settings.skin_ratio,
            source_settings,
            skin_ratio_tx: None,
            ui_update_rx,
            ui_update_tx,
            pending: false,
            error: None,
        }
    }

    pub fn start_gui(settings: &Settings) -> Result<(), AppError> {
        let coordinator = CoordinatorBuilder::new(settings.detector.clone()).build()?;
        let app = DetectorApp::new(Handle::current(), coordinator, settings.source.clone());

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(egui::vec2(1040.0, 720.0))
                .with_title(WINDOW_TITLE),
            ..Default::default()
        };

        eframe::run_native(
            WINDOW_TITLE,
            options,
            Box::new(move |_cc| Ok(Box::new(app))),
        )
        .map_err(|e| AppError::Ui(e.to_string()))
    }

    fn build_source(&mut self) -> Result<Box<dyn FrameSource>, AppError> {
        if self.source_settings.kind == SourceKind::Synthetic {
            let (source, skin_ratio_tx) = SyntheticSource::controlled(
                self.source_settings.width,
                self.source_settings.height,
                self.skin_ratio,
            );
            self.skin_ratio_tx = Some(skin_ratio_tx);
            return Ok(Box::new(source));
        }
        Ok(source::from_settings(&self.source_settings)?)
    }

    fn start_detection(&mut self) {
        self.error = None;
        let source = match self.build_source() {
            Ok(source) => source,
            Err(e) => {
                self.error = Some(e.to_string());
                return;
            }
        };

        self.pending = true;
        let coordinator = self.coordinator.clone();
        let ui_update_tx = self.ui_update_tx.clone();
        self.runtime.spawn(async move {
            let update = match coordinator.lock().await.start(source).await {
                Ok(()) => UiUpdate::Started,
                Err(e) => UiUpdate::Failed(e.to_string()),
            };
            if let Err(e) = ui_update_tx.send(update).await {
                error!("Error sending start result to the UI: {}", e);
            }
        });
    }

    fn stop_detection(&mut self) {
        self.pending = true;
        self.skin_ratio_tx = None;
        let coordinator = self.coordinator.clone();
        let ui_update_tx = self.ui_update_tx.clone();
        self.runtime.spawn(async move {
            let tally = coordinator.lock().await.stop().await;
            if let Err(e) = ui_update_tx.send(UiUpdate::Stopped(tally)).await {
                error!("Error sending stop result to the UI: {}", e);
            }
        });
    }

    fn drain_ui_updates(&mut self) {
        loop {
            match self.ui_update_rx.try_recv() {
                Ok(UiUpdate::Started) => {
                    self.pending = false;
                    info!("Detection started from the UI");
                }
                Ok(UiUpdate::Stopped(tally)) => {
                    self.pending = false;
                    info!("Detection stopped from the UI after {} ticks", tally.total());
                }
                Ok(UiUpdate::Failed(message)) => {
                    self.pending = false;
                    self.skin_ratio_tx = None;
                    self.error = Some(message);
                }
                Err(MpscTryRecvError::Empty) => break,
                Err(MpscTryRecvError::Disconnected) => {
                    error!("UI update receiver disconnected");
                    break;
                }
            }
        }
    }

    fn draw_source_panel(&mut self, ui: &mut egui::Ui, snapshot: &DetectionSnapshot) {
        ui.heading("Frame Source");
        ui.label(format!("{:?}", self.source_settings.kind));
        if let Some(path) = &self.source_settings.path {
            ui.small(path.display().to_string());
        }
        ui.separator();

        if self.source_settings.kind == SourceKind::Synthetic {
            let slider = egui::Slider::new(&mut self.skin_ratio, 0.0..=0.3).text("Skin ratio");
            if ui.add(slider).changed() {
                if let Some(skin_ratio_tx) = &self.skin_ratio_tx {
                    // The source may already be gone after a stop.
                    let _ = skin_ratio_tx.send(self.skin_ratio);
                }
            }
        }

        if let Some(error) = &self.error {
            ui.add_space(8.0);
            ui.colored_label(Color32::from_rgb(252, 165, 165), format!("⚠ {}", error));
        }

        ui.add_space(12.0);
        if !snapshot.active {
            let button = egui::Button::new(RichText::new("Start Detection").strong())
                .fill(Color32::from_rgb(34, 197, 94));
            if ui.add_enabled(!self.pending, button).clicked() {
                self.start_detection();
            }
        } else {
            let button = egui::Button::new(RichText::new("Stop Detection").strong())
                .fill(Color32::from_rgb(239, 68, 68));
            if ui.add_enabled(!self.pending, button).clicked() {
                self.stop_detection();
            }
        }
    }

    fn draw_how_to_use(ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.heading("How to Use");
            for (index, step) in HOW_TO_USE.iter().enumerate() {
                ui.label(format!("{}. {}", index + 1, step));
            }
        });
    }
}

impl eframe::App for DetectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_ui_updates();
        let snapshot = self.snapshot_rx.borrow_and_update().clone();

        egui::TopBottomPanel::top("title").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(RichText::new(WINDOW_TITLE).size(32.0).strong());
                ui.label("Real-time hand action recognition from live frames");
            });
        });

        egui::SidePanel::left("source_panel")
            .resizable(false)
            .min_width(280.0)
            .show(ctx, |ui| {
                self.draw_source_panel(ui, &snapshot);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                GestureView::new(&snapshot).draw(ui);
                ui.add_space(12.0);
                CatalogueView::new(snapshot.label()).draw(ui);
                ui.add_space(12.0);
                Self::draw_how_to_use(ui);
            });
        });

        ctx.request_repaint();
    }
}
