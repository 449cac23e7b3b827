use std::pin::Pin;
use std::time::Duration;

use crate::error::AppError;
use crate::pipeline::context::{ClassifiedState, FrameContext, SampledState};
use crate::pipeline::services::image::gesture_classifier::GestureClassifier;
use futures::Future;
use futures::task::Context;
use futures::task::Poll;
use tower::util::BoxService;
use tower::{BoxError, Service, ServiceBuilder};

/// The classification step as the tick loop drives it.
pub type ClassifierStep =
    BoxService<FrameContext<SampledState>, FrameContext<ClassifiedState>, BoxError>;

#[derive(Clone, Default)]
pub struct ClassifierService {
    classifier: GestureClassifier,
}

impl ClassifierService {
    pub fn new(classifier: GestureClassifier) -> Self {
        Self { classifier }
    }

    /// Wraps the service in a timeout so a stalled tick cannot hold the loop.
    pub fn into_step(self, timeout: Duration) -> ClassifierStep {
        let service = ServiceBuilder::new().timeout(timeout).service(self);
        BoxService::new(service)
    }
}

impl Service<FrameContext<SampledState>> for ClassifierService {
    type Response = FrameContext<ClassifiedState>;
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: FrameContext<SampledState>) -> Self::Future {
        let classifier = self.classifier;

        // Runs off the async workers so the timeout layer can fire on large frames.
        Box::pin(async move {
            tokio::task::spawn_blocking(move || {
                let classification = classifier.classify(req.frame());
                req.into_classified(classification)
            })
            .await
            .map_err(|e| AppError::Pipeline(format!("Classification task failed: {}", e)))
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use image::{DynamicImage, ImageBuffer, Rgb};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::common::Frame;
    use crate::pipeline::domain::gesture::GestureLabel;

    use super::*;

    fn skin_frame() -> Frame {
        Frame::new(
            Uuid::new_v4(),
            DynamicImage::ImageRgb8(ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(
                100,
                100,
                Rgb([200, 140, 110]),
            )),
            Utc::now(),
            Uuid::new_v4(),
        )
    }

    #[tokio::test]
    async fn test_classifier_service() {
        let mut service = ClassifierService::default();
        let response = service.call(FrameContext::new(skin_frame())).await.unwrap();
        assert_eq!(response.classification().label(), GestureLabel::OpenPalm);
        assert_eq!(response.classification().confidence(), 85);
    }

    #[tokio::test]
    async fn test_classifier_step_with_timeout() {
        let mut step = ClassifierService::default().into_step(Duration::from_secs(1));
        let response = step
            .ready()
            .await
            .unwrap()
            .call(FrameContext::new(skin_frame()))
            .await
            .unwrap();
        assert_eq!(response.classification().label(), GestureLabel::OpenPalm);
        assert!(response.metrics().classification_duration().is_some());
    }

    #[tokio::test]
    async fn test_classifier_step_times_out_on_large_frame() {
        let frame = Frame::new(
            Uuid::new_v4(),
            DynamicImage::ImageRgb8(ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(
                3000,
                3000,
                Rgb([200, 140, 110]),
            )),
            Utc::now(),
            Uuid::new_v4(),
        );

        let mut step = ClassifierService::default().into_step(Duration::from_micros(1));
        let result = step
            .ready()
            .await
            .unwrap()
            .call(FrameContext::new(frame))
            .await;
        assert!(result.is_err());
    }
}
