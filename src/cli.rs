use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use futures::StreamExt;
use indexmap::IndexMap;
use serde::Serialize;
use tokio_stream::wrappers::WatchStream;
use tracing::{error, info};

use crate::app::DetectorApp;
use crate::config::{DEFAULT_SETTINGS_FILE, Settings};
use crate::coordinator::CoordinatorBuilder;
use crate::error::{AppError, FrameError};
use crate::intake::source;
use crate::pipeline::domain::gesture::{Classification, GestureLabel};
use crate::pipeline::services::image::gesture_classifier::GestureClassifier;

#[derive(Parser)]
#[command(
    name = "hand-gesture-detector",
    version,
    about = "Classifies hand gestures from skin-tone pixel ratios"
)]
pub struct Cli {
    /// Settings file, missing files fall back to defaults
    #[arg(short, long, default_value = DEFAULT_SETTINGS_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify still images and print one result per file
    Classify {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Print JSON lines instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run the tick loop headless, logging snapshots
    Run {
        /// Stop after this many ticks
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// Open the detector window (default)
    Gui,
}

#[derive(Debug, Serialize)]
pub struct ClassificationReport {
    pub file: PathBuf,
    #[serde(flatten)]
    pub classification: Classification,
}

pub async fn execute(command: Command, settings: Settings) -> Result<(), AppError> {
    match command {
        Command::Classify { files, json } => classify_files(&files, json),
        Command::Run { ticks } => run_headless(settings, ticks).await,
        Command::Gui => DetectorApp::start_gui(&settings),
    }
}

pub fn classify_file(
    classifier: &GestureClassifier,
    path: &Path,
) -> Result<ClassificationReport, FrameError> {
    let image = image::open(path)?;
    Ok(ClassificationReport {
        file: path.to_path_buf(),
        classification: classifier.classify_image(&image),
    })
}

fn classify_files(files: &[PathBuf], json: bool) -> Result<(), AppError> {
    let classifier = GestureClassifier::new();
    let mut summary: IndexMap<GestureLabel, usize> = IndexMap::new();
    let mut failed = 0;

    for path in files {
        match classify_file(&classifier, path) {
            Ok(report) => {
                *summary.entry(report.classification.label()).or_insert(0) += 1;
                if json {
                    println!("{}", serde_json::to_string(&report)?);
                } else {
                    println!("{}: {}", report.file.display(), report.classification);
                }
            }
            Err(e) => {
                failed += 1;
                error!("Failed to classify {}: {}", path.display(), e);
            }
        }
    }

    for (label, count) in &summary {
        info!("{}: {} file(s)", label, count);
    }
    if failed > 0 {
        return Err(AppError::ClassifyFailed {
            failed,
            total: files.len(),
        });
    }
    Ok(())
}

async fn run_headless(settings: Settings, ticks: Option<u64>) -> Result<(), AppError> {
    let mut coordinator = CoordinatorBuilder::new(settings.detector.clone()).build()?;
    let mut snapshots = WatchStream::new(coordinator.subscribe());
    coordinator
        .start(source::from_settings(&settings.source)?)
        .await?;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
            snapshot = snapshots.next() => {
                let Some(snapshot) = snapshot else { break };
                tracing::debug!("{}", serde_json::to_string(&snapshot)?);
                if !snapshot.active {
                    continue;
                }
                if ticks.is_some_and(|limit| snapshot.tally.total() >= limit) {
                    break;
                }
            }
        }
    }

    let tally = coordinator.stop().await;
    info!(
        "Finished: {} classified, {} skipped",
        tally.classified, tally.skipped
    );
    Ok(())
}
