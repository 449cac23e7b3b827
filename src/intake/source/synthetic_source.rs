use async_trait::async_trait;
use chrono::Utc;
use image::{DynamicImage, Rgb, RgbImage};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tokio::sync::watch;
use uuid::Uuid;

use crate::common::Frame;
use crate::error::{FrameError, SourceError};
use crate::intake::source::frame_source::FrameSource;

pub const SKIN_TONE: Rgb<u8> = Rgb([200, 140, 110]);
pub const BACKGROUND: Rgb<u8> = Rgb([0, 0, 255]);

/// Generates frames where a fixed share of pixels, scattered at random, is
/// skin coloured and the rest is pure blue.
pub struct SyntheticSource {
    id: Uuid,
    width: u32,
    height: u32,
    skin_ratio_rx: watch::Receiver<f64>,
    rng: StdRng,
    opened: bool,
}

impl SyntheticSource {
    pub fn new(width: u32, height: u32, skin_ratio: f64) -> Self {
        Self::controlled(width, height, skin_ratio).0
    }

    /// Like `new`, also returning a sender that changes the skin ratio of
    /// subsequent frames.
    pub fn controlled(width: u32, height: u32, skin_ratio: f64) -> (Self, watch::Sender<f64>) {
        let (skin_ratio_tx, skin_ratio_rx) = watch::channel(skin_ratio.clamp(0.0, 1.0));
        let source = Self {
            id: Uuid::new_v4(),
            width,
            height,
            skin_ratio_rx,
            rng: StdRng::from_os_rng(),
            opened: false,
        };
        (source, skin_ratio_tx)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    fn render(&mut self) -> Result<DynamicImage, FrameError> {
        let total = self.width as usize * self.height as usize;
        let skin_ratio = self.skin_ratio_rx.borrow().clamp(0.0, 1.0);
        let skin_pixels = ((skin_ratio * total as f64).round() as usize).min(total);

        let mut mask = vec![false; total];
        mask[..skin_pixels].fill(true);
        mask.shuffle(&mut self.rng);

        let pixels: Vec<u8> = mask
            .iter()
            .flat_map(|&skin| if skin { SKIN_TONE.0 } else { BACKGROUND.0 })
            .collect();
        let actual = pixels.len();
        RgbImage::from_raw(self.width, self.height, pixels)
            .map(DynamicImage::ImageRgb8)
            .ok_or(FrameError::InvalidBufferLength {
                width: self.width,
                height: self.height,
                actual,
            })
    }
}

#[async_trait]
impl FrameSource for SyntheticSource {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    async fn open(&mut self) -> Result<(), SourceError> {
        if self.width == 0 || self.height == 0 {
            return Err(SourceError::Unavailable(format!(
                "synthetic frames of {}x{} have no pixels",
                self.width, self.height
            )));
        }
        self.opened = true;
        Ok(())
    }

    async fn sample(&mut self) -> Result<Option<Frame>, SourceError> {
        if !self.opened {
            return Err(SourceError::NotOpen(self.id));
        }
        let image = self.render().map_err(|e| SourceError::Read(self.id, e))?;
        Ok(Some(Frame::new(self.id, image, Utc::now(), Uuid::new_v4())))
    }

    async fn close(&mut self) {
        self.opened = false;
    }
}
