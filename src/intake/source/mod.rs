pub mod directory_source;
pub mod frame_source;
pub mod still_image_source;
pub mod synthetic_source;

pub use directory_source::ImageDirectorySource;
pub use frame_source::FrameSource;
pub use still_image_source::StillImageSource;
pub use synthetic_source::SyntheticSource;

use crate::config::{SourceKind, SourceSettings};
use crate::error::SourceError;

/// Builds the frame source described by the settings.
pub fn from_settings(settings: &SourceSettings) -> Result<Box<dyn FrameSource>, SourceError> {
    let path = || {
        settings.path.clone().ok_or_else(|| {
            SourceError::Unavailable(format!("no path configured for the {:?} source", settings.kind))
        })
    };
    let source: Box<dyn FrameSource> = match settings.kind {
        SourceKind::Synthetic => Box::new(SyntheticSource::new(
            settings.width,
            settings.height,
            settings.skin_ratio,
        )),
        SourceKind::Directory => Box::new(ImageDirectorySource::new(path()?, settings.looping)),
        SourceKind::Image => Box::new(StillImageSource::new(path()?)),
    };
    Ok(source)
}
