use chrono::{DateTime, Utc};
use image::{DynamicImage, GenericImageView, RgbaImage};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::FrameError;

/// A single sampled video image. The pixel data is shared, so cloning a
/// frame never copies the buffer.
#[derive(Clone, Debug)]
pub struct Frame {
    source_id: Uuid,
    image: Arc<DynamicImage>,
    captured_at: DateTime<Utc>,
    frame_id: Uuid,
}

impl Frame {
    pub fn new(
        source_id: Uuid,
        image: DynamicImage,
        captured_at: DateTime<Utc>,
        frame_id: Uuid,
    ) -> Self {
        Self::from_shared(source_id, Arc::new(image), captured_at, frame_id)
    }

    pub fn from_shared(
        source_id: Uuid,
        image: Arc<DynamicImage>,
        captured_at: DateTime<Utc>,
        frame_id: Uuid,
    ) -> Self {
        Self {
            source_id,
            image,
            captured_at,
            frame_id,
        }
    }

    /// Builds a frame from a raw RGBA buffer, four bytes per pixel, rows top to bottom.
    pub fn from_rgba(
        source_id: Uuid,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Result<Self, FrameError> {
        let actual = pixels.len();
        let invalid = FrameError::InvalidBufferLength {
            width,
            height,
            actual,
        };
        if actual as u64 != width as u64 * height as u64 * 4 {
            return Err(invalid);
        }
        let image = RgbaImage::from_raw(width, height, pixels).ok_or(invalid)?;
        Ok(Self::new(
            source_id,
            DynamicImage::ImageRgba8(image),
            Utc::now(),
            Uuid::new_v4(),
        ))
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel_count(&self) -> u64 {
        let (width, height) = self.image.dimensions();
        width as u64 * height as u64
    }

    pub fn source_id(&self) -> Uuid {
        self.source_id
    }

    pub fn frame_id(&self) -> Uuid {
        self.frame_id
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}
