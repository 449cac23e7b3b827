use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::common::Frame;
use crate::error::{FrameError, SourceError};
use crate::intake::source::frame_source::FrameSource;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// Replays the images of a directory in file-name order, one per tick.
pub struct ImageDirectorySource {
    id: Uuid,
    dir: PathBuf,
    looping: bool,
    files: Vec<PathBuf>,
    cursor: usize,
    opened: bool,
}

impl ImageDirectorySource {
    pub fn new(dir: impl Into<PathBuf>, looping: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            dir: dir.into(),
            looping,
            files: Vec::new(),
            cursor: 0,
            opened: false,
        }
    }

    fn is_image(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
    }

    async fn list_images(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_file() && Self::is_image(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

#[async_trait]
impl FrameSource for ImageDirectorySource {
    fn name(&self) -> &'static str {
        "image-directory"
    }

    async fn open(&mut self) -> Result<(), SourceError> {
        let files = Self::list_images(&self.dir)
            .await
            .map_err(|e| SourceError::Unavailable(format!("{}: {}", self.dir.display(), e)))?;
        if files.is_empty() {
            return Err(SourceError::Unavailable(format!(
                "no images found in {}",
                self.dir.display()
            )));
        }
        tracing::info!("Replaying {} images from {}", files.len(), self.dir.display());
        self.files = files;
        self.cursor = 0;
        self.opened = true;
        Ok(())
    }

    async fn sample(&mut self) -> Result<Option<Frame>, SourceError> {
        if !self.opened {
            return Err(SourceError::NotOpen(self.id));
        }
        if self.cursor >= self.files.len() {
            if !self.looping {
                return Ok(None);
            }
            self.cursor = 0;
        }

        let path = self.files[self.cursor].clone();
        self.cursor += 1;

        let id = self.id;
        let image = tokio::task::spawn_blocking(move || image::open(path))
            .await
            .map_err(|e| SourceError::Read(id, FrameError::Io(std::io::Error::other(e))))?
            .map_err(|e| SourceError::Read(id, FrameError::from(e)))?;

        Ok(Some(Frame::new(id, image, Utc::now(), Uuid::new_v4())))
    }

    async fn close(&mut self) {
        self.files.clear();
        self.cursor = 0;
        self.opened = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn fixture_dir(widths: &[u32]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("frames-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        for (index, width) in widths.iter().enumerate() {
            RgbImage::from_pixel(*width, 2, Rgb([0, 0, 255]))
                .save(dir.join(format!("frame_{index:03}.png")))
                .unwrap();
        }
        std::fs::write(dir.join("notes.txt"), "not a frame").unwrap();
        dir
    }

    #[tokio::test]
    async fn replays_images_in_name_order() {
        let dir = fixture_dir(&[3, 5]);
        let mut source = ImageDirectorySource::new(&dir, false);
        source.open().await.unwrap();

        let widths = [
            source.sample().await.unwrap().map(|f| f.width()),
            source.sample().await.unwrap().map(|f| f.width()),
            source.sample().await.unwrap().map(|f| f.width()),
        ];
        assert_eq!(widths, [Some(3), Some(5), None]);

        source.close().await;
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn looping_restarts_from_the_first_image() {
        let dir = fixture_dir(&[3, 5]);
        let mut source = ImageDirectorySource::new(&dir, true);
        source.open().await.unwrap();

        let mut widths = Vec::new();
        for _ in 0..3 {
            widths.push(source.sample().await.unwrap().unwrap().width());
        }
        assert_eq!(widths, vec![3, 5, 3]);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn empty_or_missing_directory_is_unavailable() {
        let dir = fixture_dir(&[]);
        let mut source = ImageDirectorySource::new(&dir, true);
        assert!(matches!(source.open().await, Err(SourceError::Unavailable(_))));
        std::fs::remove_dir_all(&dir).unwrap();

        let mut source = ImageDirectorySource::new(dir.join("nope"), true);
        assert!(matches!(source.open().await, Err(SourceError::Unavailable(_))));
    }

    #[tokio::test]
    async fn sampling_before_open_fails() {
        let mut source = ImageDirectorySource::new("unused", true);
        assert!(matches!(source.sample().await, Err(SourceError::NotOpen(_))));
    }
}
