use async_trait::async_trait;

use crate::common::Frame;
use crate::error::SourceError;

/// Anything that can hand the tick loop its next frame.
///
/// `sample` returning `Ok(None)` means no frame is ready this tick.
#[async_trait]
pub trait FrameSource: Send + 'static {
    fn name(&self) -> &'static str;

    /// Acquires the underlying resource. An `Unavailable` error here means
    /// the classifier is never invoked for this source.
    async fn open(&mut self) -> Result<(), SourceError>;

    async fn sample(&mut self) -> Result<Option<Frame>, SourceError>;

    /// Releases the underlying resource.
    async fn close(&mut self);
}
