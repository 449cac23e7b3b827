use std::sync::Arc;

use crate::{
    config::DetectorSettings,
    error::AppError,
    intake::source::FrameSource,
    pipeline::{
        context::{ClassifiedState, FrameContext},
        domain::snapshot::{DetectionSnapshot, TickTally},
        orchestration::service::classifier_service::{ClassifierService, ClassifierStep},
        services::image::gesture_classifier::GestureClassifier,
    },
};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tower::{Service, ServiceExt};
use tracing::instrument;

struct TickLoop {
    task: JoinHandle<TickTally>,
    cancel_token: CancellationToken,
}

/// Drives the frame source and the classifier once per refresh tick and
/// publishes every result as an immutable snapshot.
pub struct Coordinator {
    settings: DetectorSettings,
    classifier: GestureClassifier,
    snapshot_tx: Arc<watch::Sender<DetectionSnapshot>>,
    tick_loop: Option<TickLoop>,
}

impl Coordinator {
    fn new(settings: DetectorSettings, classifier: GestureClassifier) -> Self {
        let (snapshot_tx, _) = watch::channel(DetectionSnapshot::default());
        Self {
            settings,
            classifier,
            snapshot_tx: Arc::new(snapshot_tx),
            tick_loop: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DetectionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.tick_loop.is_some()
    }

    /// Opens the source and starts ticking. If the source cannot be opened
    /// the error is returned and nothing is classified.
    pub async fn start(&mut self, mut source: Box<dyn FrameSource>) -> Result<(), AppError> {
        if self.is_running() {
            return Err(AppError::AlreadyStarted);
        }

        if let Err(e) = source.open().await {
            tracing::error!("Failed to open frame source {}: {}", source.name(), e);
            return Err(e.into());
        }
        tracing::info!(
            "Starting detection on {} at {} Hz",
            source.name(),
            self.settings.refresh_rate_hz
        );

        self.snapshot_tx.send_replace(DetectionSnapshot::started());

        let cancel_token = CancellationToken::new();
        let step = ClassifierService::new(self.classifier).into_step(self.settings.classify_timeout());
        let task = tokio::spawn(Self::run_tick_loop(
            source,
            step,
            self.snapshot_tx.clone(),
            self.settings.clone(),
            cancel_token.clone(),
        ));
        self.tick_loop = Some(TickLoop { task, cancel_token });
        Ok(())
    }

    /// Stops ticking, releases the source and publishes the idle snapshot.
    pub async fn stop(&mut self) -> TickTally {
        let Some(tick_loop) = self.tick_loop.take() else {
            return self.snapshot_tx.borrow().tally;
        };

        tick_loop.cancel_token.cancel();
        let tally = match tick_loop.task.await {
            Ok(tally) => tally,
            Err(e) => {
                tracing::error!("Tick loop ended abnormally: {}", e);
                self.snapshot_tx.borrow().tally
            }
        };

        self.snapshot_tx.send_replace(DetectionSnapshot::idle(tally));
        tracing::info!(
            "Detection stopped after {} classified and {} skipped ticks",
            tally.classified,
            tally.skipped
        );
        tally
    }

    async fn run_tick_loop(
        mut source: Box<dyn FrameSource>,
        mut step: ClassifierStep,
        snapshot_tx: Arc<watch::Sender<DetectionSnapshot>>,
        settings: DetectorSettings,
        cancel_token: CancellationToken,
    ) -> TickTally {
        let mut interval = tokio::time::interval(settings.tick_period());
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut tally = TickTally::default();

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => break,
                _ = interval.tick() => {
                    match Self::tick(source.as_mut(), &mut step).await {
                        Ok(Some(context)) => {
                            tally.classified += 1;
                            let snapshot = DetectionSnapshot::classified(&context, tally);
                            if settings.snapshot_log_every > 0
                                && tally.classified % settings.snapshot_log_every == 0
                            {
                                tracing::info!(
                                    "Tick {}: {} ({}%)",
                                    tally.total(),
                                    snapshot.display_label(),
                                    snapshot.confidence()
                                );
                            }
                            snapshot_tx.send_replace(snapshot);
                        }
                        Ok(None) => {
                            tally.skipped += 1;
                            tracing::debug!("No frame ready, skipping tick");
                            Self::publish_skipped(&snapshot_tx, tally);
                        }
                        Err(e) => {
                            tally.skipped += 1;
                            tracing::warn!("Skipping tick: {}", e);
                            Self::publish_skipped(&snapshot_tx, tally);
                        }
                    }
                }
            }
        }

        source.close().await;
        tracing::info!("Released frame source {}", source.name());
        tally
    }

    /// A skipped tick produces no result, only the tally moves.
    fn publish_skipped(snapshot_tx: &watch::Sender<DetectionSnapshot>, tally: TickTally) {
        let snapshot = snapshot_tx.borrow().with_tally(tally);
        snapshot_tx.send_replace(snapshot);
    }

    #[instrument(skip_all, fields(source = source.name()))]
    async fn tick(
        source: &mut dyn FrameSource,
        step: &mut ClassifierStep,
    ) -> Result<Option<FrameContext<ClassifiedState>>, AppError> {
        let Some(frame) = source.sample().await? else {
            return Ok(None);
        };

        let context = step
            .ready()
            .await
            .map_err(|e| AppError::Pipeline(e.to_string()))?
            .call(FrameContext::new(frame))
            .await
            .map_err(|e| AppError::Pipeline(e.to_string()))?;

        tracing::debug!(
            frame = %context.frame().frame_id(),
            classification = %context.classification(),
            elapsed_us = context.elapsed().as_micros() as u64,
            "Tick classified"
        );
        Ok(Some(context))
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        if let Some(tick_loop) = self.tick_loop.take() {
            tick_loop.cancel_token.cancel();
        }
    }
}

pub struct CoordinatorBuilder {
    settings: DetectorSettings,
    classifier: GestureClassifier,
}

impl CoordinatorBuilder {
    pub fn new(settings: DetectorSettings) -> Self {
        Self {
            settings,
            classifier: GestureClassifier::new(),
        }
    }

    // Sets the refresh rate, this will override the configured value.
    pub fn refresh_rate_hz(mut self, refresh_rate_hz: u32) -> Self {
        self.settings.refresh_rate_hz = refresh_rate_hz;
        self
    }

    // Sets how many classified ticks pass between info-level summaries.
    pub fn snapshot_log_every(mut self, snapshot_log_every: u64) -> Self {
        self.settings.snapshot_log_every = snapshot_log_every;
        self
    }

    // Sets the per-frame classification timeout in milliseconds.
    pub fn classify_timeout_ms(mut self, classify_timeout_ms: u64) -> Self {
        self.settings.classify_timeout_ms = classify_timeout_ms;
        self
    }

    pub fn build(self) -> Result<Coordinator, AppError> {
        self.settings.validate()?;
        Ok(Coordinator::new(self.settings, self.classifier))
    }
}
