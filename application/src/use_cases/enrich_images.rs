//! Enrich Images use case
//!
//! Requests one illustration per itinerary day, all at once, and returns
//! them in day order. A failed, empty, timed-out or cancelled request
//! yields [`ImageRef::Placeholder`]; this use case never fails.

use crate::config::GenerationParams;
use crate::ports::image_generator::{ImageGenerationRequest, ImageGenerator};
use crate::ports::progress::PipelineObserver;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tourgen_domain::{ImageRef, ImageSpec, PromptTemplate, TourPackage};
use tracing::{debug, info, warn};

/// Use case for attaching pictures to a tour package
pub struct EnrichImagesUseCase {
    generator: Arc<dyn ImageGenerator>,
    params: GenerationParams,
}

impl EnrichImagesUseCase {
    pub fn new(generator: Arc<dyn ImageGenerator>, params: GenerationParams) -> Self {
        Self { generator, params }
    }

    /// Generate a single image for `subject`
    pub async fn generate_image(&self, subject: &str) -> ImageRef {
        Self::request_image(
            Arc::clone(&self.generator),
            self.params.image_model.clone(),
            subject.to_string(),
            self.params.image_timeout,
        )
        .await
    }

    /// Generate one image per day of `package`.
    ///
    /// The result has exactly one entry per itinerary day, in itinerary
    /// order, whatever order the requests complete in.
    pub async fn enrich(
        &self,
        package: &TourPackage,
        cancel: &CancellationToken,
        observer: &dyn PipelineObserver,
    ) -> Vec<ImageRef> {
        let total = package.days.len();
        let mut slots = vec![ImageRef::Placeholder; total];

        if cancel.is_cancelled() {
            info!("Image generation skipped: run cancelled");
            return slots;
        }

        info!(
            count = total,
            model = %self.params.image_model,
            "Generating itinerary images"
        );

        let semaphore = match self.params.max_concurrent_images {
            0 => None,
            limit => Some(Arc::new(Semaphore::new(limit))),
        };

        let mut join_set = JoinSet::new();

        for (index, day) in package.days.iter().enumerate() {
            let generator = Arc::clone(&self.generator);
            let model = self.params.image_model.clone();
            let subject = PromptTemplate::image_subject(&day.title, &package.location);
            let timeout = self.params.image_timeout;
            let semaphore = semaphore.clone();
            let cancel = cancel.clone();
            let day_number = day.day;

            join_set.spawn(async move {
                let image = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => None,
                    image = async {
                        let _permit = acquire(semaphore).await;
                        Self::request_image(generator, model, subject, timeout).await
                    } => Some(image),
                };
                (index, day_number, image)
            });
        }

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((index, day, Some(image))) => {
                    let success = !image.is_placeholder();
                    debug!(day, success, "Image request finished");
                    observer.on_image_complete(day, success);
                    slots[index] = image;
                }
                Ok((_, day, None)) => {
                    debug!(day, "Image request cancelled");
                    observer.on_image_complete(day, false);
                }
                Err(e) => {
                    warn!("Image task join error: {}", e);
                }
            }
        }

        slots
    }

    /// One request to the image capability, degraded to the placeholder on failure
    async fn request_image(
        generator: Arc<dyn ImageGenerator>,
        model: String,
        subject: String,
        timeout: Option<Duration>,
    ) -> ImageRef {
        let request = ImageGenerationRequest {
            model,
            prompt: PromptTemplate::image_prompt(&subject),
            count: ImageSpec::COUNT,
            mime_type: ImageSpec::MIME_TYPE.to_string(),
            aspect_ratio: ImageSpec::ASPECT_RATIO.to_string(),
        };

        let result = match timeout {
            Some(limit) => match tokio::time::timeout(limit, generator.generate_images(request)).await
            {
                Ok(result) => result,
                Err(_) => {
                    warn!(subject = %subject, "Image generation timed out after {:?}", limit);
                    return ImageRef::Placeholder;
                }
            },
            None => generator.generate_images(request).await,
        };

        match result {
            Ok(images) => match images.into_iter().next() {
                Some(image) => ImageRef::from_base64(&image.mime_type, &image.base64_bytes),
                None => {
                    warn!(subject = %subject, "Image model returned no images");
                    ImageRef::Placeholder
                }
            },
            Err(e) => {
                warn!(subject = %subject, "Image generation failed: {}", e);
                ImageRef::Placeholder
            }
        }
    }
}

async fn acquire(semaphore: Option<Arc<Semaphore>>) -> Option<OwnedSemaphorePermit> {
    match semaphore {
        Some(semaphore) => semaphore.acquire_owned().await.ok(),
        None => None,
    }
}
