use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use image::DynamicImage;
use uuid::Uuid;

use crate::common::Frame;
use crate::error::{FrameError, SourceError};
use crate::intake::source::frame_source::FrameSource;

/// Serves the same decoded image on every tick.
pub struct StillImageSource {
    id: Uuid,
    path: PathBuf,
    image: Option<Arc<DynamicImage>>,
}

impl StillImageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            id: Uuid::new_v4(),
            path: path.into(),
            image: None,
        }
    }
}

#[async_trait]
impl FrameSource for StillImageSource {
    fn name(&self) -> &'static str {
        "still-image"
    }

    async fn open(&mut self) -> Result<(), SourceError> {
        let path = self.path.clone();
        let decoded = tokio::task::spawn_blocking(move || image::open(&path))
            .await
            .map_err(|e| SourceError::Unavailable(e.to_string()))?
            .map_err(|e| {
                SourceError::Unavailable(format!("{}: {}", self.path.display(), FrameError::from(e)))
            })?;
        tracing::info!(
            "Opened still image {} ({}x{})",
            self.path.display(),
            decoded.width(),
            decoded.height()
        );
        self.image = Some(Arc::new(decoded));
        Ok(())
    }

    async fn sample(&mut self) -> Result<Option<Frame>, SourceError> {
        let image = self.image.as_ref().ok_or(SourceError::NotOpen(self.id))?;
        Ok(Some(Frame::from_shared(
            self.id,
            image.clone(),
            Utc::now(),
            Uuid::new_v4(),
        )))
    }

    async fn close(&mut self) {
        self.image = None;
    }
}
