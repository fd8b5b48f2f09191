//! Run Pipeline use case
//!
//! Orchestrates a full generation run and owns the observable state.
//!
//! ```text
//! Idle ──submit──▶ GeneratingText ──ok──▶ GeneratingImages ──▶ Ready
//!                        │ (text-only package published)
//!                        └──err──▶ Failed
//! ```
//!
//! Only the text step can fail a run. Image problems degrade to
//! placeholders. Each submission gets a fresh run id; a run that has been
//! superseded never writes state again.

use crate::config::GenerationParams;
use crate::ports::image_generator::ImageGenerator;
use crate::ports::progress::{NoProgress, PipelineObserver};
use crate::ports::run_journal::{NoRunJournal, RunEvent, RunJournal};
use crate::ports::text_generator::TextGenerator;
use crate::use_cases::enrich_images::EnrichImagesUseCase;
use crate::use_cases::generate_package::GeneratePackageUseCase;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tourgen_domain::{
    PackageValidator, PipelinePhase, PipelineSnapshot, PriceAudit, TourPackage, TripRequest,
};
use tracing::{debug, error, info, warn};

/// Generation pipeline with observable state
pub struct TourPipeline {
    generate: GeneratePackageUseCase,
    enrich: EnrichImagesUseCase,
    images_enabled: bool,
    journal: Arc<dyn RunJournal>,
    state: watch::Sender<PipelineSnapshot>,
    current_run: AtomicU64,
}

impl TourPipeline {
    pub fn new(
        text: Arc<dyn TextGenerator>,
        images: Arc<dyn ImageGenerator>,
        params: GenerationParams,
    ) -> Self {
        let (state, _) = watch::channel(PipelineSnapshot::default());
        Self {
            images_enabled: params.images_enabled,
            generate: GeneratePackageUseCase::new(text, params.clone()),
            enrich: EnrichImagesUseCase::new(images, params),
            journal: Arc::new(NoRunJournal),
            state,
            current_run: AtomicU64::new(0),
        }
    }

    /// Create with a run journal.
    pub fn with_run_journal(mut self, journal: Arc<dyn RunJournal>) -> Self {
        self.journal = journal;
        self
    }

    /// Receiver that sees every state change
    pub fn subscribe(&self) -> watch::Receiver<PipelineSnapshot> {
        self.state.subscribe()
    }

    /// Current state
    pub fn snapshot(&self) -> PipelineSnapshot {
        self.state.borrow().clone()
    }

    /// Run the pipeline without progress callbacks or cancellation
    pub async fn submit(&self, request: TripRequest) -> PipelineSnapshot {
        self.submit_with_cancel(request, &CancellationToken::new(), &NoProgress)
            .await
    }

    /// Run the pipeline for `request`.
    ///
    /// Returns the terminal state of this run. A run superseded by a later
    /// submission stops at its next step and returns the current state,
    /// which belongs to the newer run.
    pub async fn submit_with_cancel(
        &self,
        request: TripRequest,
        cancel: &CancellationToken,
        observer: &dyn PipelineObserver,
    ) -> PipelineSnapshot {
        let run_id = self.current_run.fetch_add(1, Ordering::SeqCst) + 1;

        info!(run_id, request = %request, "Tour generation submitted");
        self.journal.record(RunEvent::new(
            run_id,
            "run_submitted",
            json!({ "request": request }),
        ));

        // Step 1: clear the previous result and start loading
        self.publish(run_id, PipelineSnapshot::started(run_id), observer);

        // Step 2: itinerary text
        let package = match self.generate.execute(&request).await {
            Ok(package) => package,
            Err(e) => {
                if !self.is_current(run_id) {
                    debug!(run_id, error = %e, "Superseded run failed; discarding");
                    return self.snapshot();
                }
                error!(run_id, error = %e, "Tour package generation failed");
                self.journal.record(RunEvent::new(
                    run_id,
                    "run_failed",
                    json!({ "error": e.to_string() }),
                ));
                self.publish(
                    run_id,
                    PipelineSnapshot::failed(run_id, e.user_message()),
                    observer,
                );
                return self.snapshot();
            }
        };

        if !self.is_current(run_id) {
            debug!(run_id, "Run superseded after text generation");
            return self.snapshot();
        }

        self.review_package(run_id, &request, &package, observer);

        if !self.images_enabled {
            info!(run_id, "Image generation disabled");
            self.finish(run_id, package, observer);
            return self.snapshot();
        }

        // Steps 3-4: disclose the text-only package while images are pending
        let published = self.publish(
            run_id,
            PipelineSnapshot::in_phase(
                run_id,
                PipelinePhase::GeneratingImages,
                Some(package.clone()),
            ),
            observer,
        );
        if !published {
            return self.snapshot();
        }
        observer.on_partial_package(&package);

        let images = self.enrich.enrich(&package, cancel, observer).await;

        if images.len() != package.days.len() {
            warn!(
                run_id,
                images = images.len(),
                days = package.days.len(),
                "Image count differs from itinerary length"
            );
        }

        for (day, image) in package.days.iter().zip(&images) {
            self.journal.record(RunEvent::new(
                run_id,
                "image_result",
                json!({
                    "day": day.day,
                    "success": !image.is_placeholder(),
                }),
            ));
        }

        // Steps 5-6: merge by position and finish
        self.finish(run_id, package.with_images(images), observer);
        self.snapshot()
    }

    fn finish(&self, run_id: u64, package: TourPackage, observer: &dyn PipelineObserver) {
        let image_count = package.image_count();
        if self.publish(run_id, PipelineSnapshot::ready(run_id, package), observer) {
            info!(run_id, images = image_count, "Tour package ready");
            self.journal.record(RunEvent::new(
                run_id,
                "run_completed",
                json!({ "images": image_count }),
            ));
        }
    }

    /// Advisory checks: price audit and hotel tier
    fn review_package(
        &self,
        run_id: u64,
        request: &TripRequest,
        package: &TourPackage,
        observer: &dyn PipelineObserver,
    ) {
        let audit = PriceAudit::of(package);
        if audit.is_consistent() {
            debug!(run_id, "{}", audit);
        } else {
            warn!(run_id, "Price breakdown mismatch: {}", audit);
        }
        observer.on_price_audit(&audit);
        self.journal.record(RunEvent::new(
            run_id,
            "price_audit",
            json!({ "audit": audit }),
        ));

        for warning in PackageValidator::warnings(package, request.hotel_tier()) {
            warn!(run_id, "{}", warning);
        }
    }

    fn is_current(&self, run_id: u64) -> bool {
        self.current_run.load(Ordering::SeqCst) == run_id
    }

    /// Publish `snapshot` if `run_id` is still the current run
    fn publish(
        &self,
        run_id: u64,
        snapshot: PipelineSnapshot,
        observer: &dyn PipelineObserver,
    ) -> bool {
        let phase = snapshot.phase;
        let published = self.state.send_if_modified(|current| {
            if !self.is_current(run_id) {
                return false;
            }
            *current = snapshot;
            true
        });

        if published {
            debug!(run_id, phase = %phase, "Pipeline state changed");
            self.journal.record(RunEvent::new(
                run_id,
                "phase_changed",
                json!({ "phase": phase }),
            ));
            observer.on_phase_change(&self.snapshot());
        } else {
            debug!(run_id, phase = %phase, "Discarded state from superseded run");
        }
        published
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::text_generator::{GatewayError, TextGenerationRequest};
    use crate::use_cases::enrich_images::test_support::{Scripted, ScriptedImageGenerator};
    use crate::use_cases::generate_package::test_support::{package_json, package_text};
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;
    use tourgen_domain::{GENERATION_FAILED_MESSAGE, HotelTier, ImageRef, PipelineStatus};

    // ==================== Test Mocks ====================

    struct MockTextGenerator {
        responses: Mutex<VecDeque<(Duration, Result<String, GatewayError>)>>,
    }

    impl MockTextGenerator {
        fn new(responses: Vec<Result<String, GatewayError>>) -> Self {
            Self::delayed(responses.into_iter().map(|r| (Duration::ZERO, r)).collect())
        }

        fn delayed(responses: Vec<(Duration, Result<String, GatewayError>)>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(responses)),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for MockTextGenerator {
        async fn generate_structured(
            &self,
            _request: TextGenerationRequest,
        ) -> Result<String, GatewayError> {
            let next = self.responses.lock().unwrap().pop_front();
            match next {
                Some((delay, result)) => {
                    tokio::time::sleep(delay).await;
                    result
                }
                None => Err(GatewayError::Other("No more responses".to_string())),
            }
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        phases: Mutex<Vec<PipelinePhase>>,
        partial: Mutex<Option<TourPackage>>,
        audits: Mutex<Vec<PriceAudit>>,
    }

    impl PipelineObserver for RecordingObserver {
        fn on_phase_change(&self, snapshot: &PipelineSnapshot) {
            self.phases.lock().unwrap().push(snapshot.phase);
        }

        fn on_image_complete(&self, _day: u32, _success: bool) {}

        fn on_partial_package(&self, package: &TourPackage) {
            *self.partial.lock().unwrap() = Some(package.clone());
        }

        fn on_price_audit(&self, audit: &PriceAudit) {
            self.audits.lock().unwrap().push(audit.clone());
        }
    }

    #[derive(Default)]
    struct MemoryJournal {
        events: Mutex<Vec<(u64, &'static str)>>,
    }

    impl MemoryJournal {
        fn kinds(&self) -> Vec<&'static str> {
            self.events.lock().unwrap().iter().map(|(_, kind)| *kind).collect()
        }
    }

    impl RunJournal for MemoryJournal {
        fn record(&self, event: RunEvent) {
            self.events.lock().unwrap().push((event.run_id, event.kind));
        }
    }

    fn kyoto(days: u32) -> TripRequest {
        TripRequest::new("Kyoto, Japan", days, 2, HotelTier::FourStar).unwrap()
    }

    fn pipeline(
        text: MockTextGenerator,
        images: ScriptedImageGenerator,
        params: GenerationParams,
    ) -> TourPipeline {
        TourPipeline::new(Arc::new(text), Arc::new(images), params)
    }

    // ==================== Happy path ====================

    #[tokio::test]
    async fn test_initial_state_is_idle() {
        let pipeline = pipeline(
            MockTextGenerator::new(vec![]),
            ScriptedImageGenerator::always("QQ=="),
            GenerationParams::default(),
        );
        let snapshot = pipeline.snapshot();
        assert_eq!(snapshot.status, PipelineStatus::Idle);
        assert_eq!(snapshot.run_id, 0);
        assert!(snapshot.package.is_none());
    }

    #[tokio::test]
    async fn test_kyoto_run_reaches_ready_with_images() {
        let pipeline = pipeline(
            MockTextGenerator::new(vec![Ok(package_text("Kyoto Temples", 3))]),
            ScriptedImageGenerator::always("QQ=="),
            GenerationParams::default(),
        );
        let observer = RecordingObserver::default();

        let snapshot = pipeline
            .submit_with_cancel(kyoto(3), &CancellationToken::new(), &observer)
            .await;

        assert_eq!(snapshot.status, PipelineStatus::Ready);
        assert!(snapshot.error_message.is_none());
        assert!(snapshot.loading_label.is_empty());

        let package = snapshot.package.unwrap();
        assert_eq!(package.duration_days, 3);
        assert!(HotelTier::FourStar.matches_label(&package.hotel.rating_label));
        assert_eq!(package.days.len(), 3);
        assert_eq!(package.day_numbers(), vec![1, 2, 3]);
        assert_eq!(package.image_count(), 3);
        assert_eq!(
            package.days[0].image.as_ref().and_then(ImageRef::data_uri),
            Some("data:image/jpeg;base64,QQ==")
        );

        assert_eq!(
            *observer.phases.lock().unwrap(),
            vec![
                PipelinePhase::GeneratingText,
                PipelinePhase::GeneratingImages,
                PipelinePhase::Ready,
            ]
        );

        // Text-only package was disclosed before images
        let partial = observer.partial.lock().unwrap().clone().unwrap();
        assert!(partial.days.iter().all(|d| d.image.is_none()));

        assert!(observer.audits.lock().unwrap()[0].is_consistent());
    }

    #[tokio::test]
    async fn test_partial_package_visible_while_images_pending() {
        let pipeline = pipeline(
            MockTextGenerator::new(vec![Ok(package_text("Slow Pictures", 2))]),
            ScriptedImageGenerator::new(vec![], Scripted::Image("QQ==", Duration::from_millis(100))),
            GenerationParams::default(),
        );
        let mut receiver = pipeline.subscribe();

        let watcher = async {
            loop {
                if receiver.changed().await.is_err() {
                    return None;
                }
                let snapshot = receiver.borrow_and_update().clone();
                if snapshot.phase == PipelinePhase::GeneratingImages {
                    return Some(snapshot);
                }
            }
        };

        let (partial, final_state) = tokio::join!(watcher, pipeline.submit(kyoto(2)));

        let partial = partial.unwrap();
        assert_eq!(partial.loading_label, "Generating breathtaking visuals...");
        assert_eq!(partial.package.unwrap().name, "Slow Pictures");
        assert_eq!(final_state.status, PipelineStatus::Ready);
    }

    #[tokio::test]
    async fn test_images_disabled_finishes_with_text_only() {
        let images = ScriptedImageGenerator::always("QQ==");
        let pipeline = pipeline(
            MockTextGenerator::new(vec![Ok(package_text("Text Only", 2))]),
            images,
            GenerationParams::default().with_images_enabled(false),
        );

        let snapshot = pipeline.submit(kyoto(2)).await;
        assert_eq!(snapshot.status, PipelineStatus::Ready);
        let package = snapshot.package.unwrap();
        assert!(package.days.iter().all(|d| d.image.is_none()));
    }

    // ==================== Failures ====================

    #[tokio::test]
    async fn test_missing_package_name_fails_run() {
        let mut value = package_json("x", 3);
        value.as_object_mut().unwrap().remove("packageName");

        let pipeline = pipeline(
            MockTextGenerator::new(vec![Ok(value.to_string())]),
            ScriptedImageGenerator::always("QQ=="),
            GenerationParams::default(),
        );

        let snapshot = pipeline.submit(kyoto(3)).await;
        assert_eq!(snapshot.status, PipelineStatus::Failed);
        assert!(snapshot.package.is_none());
        assert_eq!(snapshot.error_message.as_deref(), Some(GENERATION_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_upstream_error_fails_run() {
        let pipeline = pipeline(
            MockTextGenerator::new(vec![Err(GatewayError::Connection("refused".to_string()))]),
            ScriptedImageGenerator::always("QQ=="),
            GenerationParams::default(),
        );

        let snapshot = pipeline.submit(kyoto(3)).await;
        assert_eq!(snapshot.phase, PipelinePhase::Failed);
        assert_eq!(snapshot.error_message.as_deref(), Some(GENERATION_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_wrong_day_count_fails_run() {
        let pipeline = pipeline(
            MockTextGenerator::new(vec![Ok(package_text("Too Short", 2))]),
            ScriptedImageGenerator::always("QQ=="),
            GenerationParams::default(),
        );

        let snapshot = pipeline.submit(kyoto(3)).await;
        assert_eq!(snapshot.status, PipelineStatus::Failed);
    }

    #[tokio::test]
    async fn test_image_failures_still_ready() {
        let pipeline = pipeline(
            MockTextGenerator::new(vec![Ok(package_text("No Pictures", 3))]),
            ScriptedImageGenerator::new(
                vec![("Day 2", Scripted::Image("Qg==", Duration::ZERO))],
                Scripted::Fail,
            ),
            GenerationParams::default(),
        );

        let snapshot = pipeline.submit(kyoto(3)).await;
        assert_eq!(snapshot.status, PipelineStatus::Ready);

        let package = snapshot.package.unwrap();
        assert_eq!(package.days[0].image, Some(ImageRef::Placeholder));
        assert!(package.days[1].has_image());
        assert_eq!(package.days[2].image, Some(ImageRef::Placeholder));
    }

    #[tokio::test]
    async fn test_zero_images_yield_placeholders() {
        let pipeline = pipeline(
            MockTextGenerator::new(vec![Ok(package_text("Filtered", 2))]),
            ScriptedImageGenerator::new(vec![], Scripted::Empty),
            GenerationParams::default(),
        );

        let snapshot = pipeline.submit(kyoto(2)).await;
        let package = snapshot.package.unwrap();
        assert_eq!(package.image_count(), 0);
        assert!(package.days.iter().all(|d| d.image == Some(ImageRef::Placeholder)));
    }

    #[tokio::test]
    async fn test_price_mismatch_is_advisory() {
        let mut value = package_json("Pricey", 3);
        value["totalPrice"] = serde_json::json!(5000);

        let pipeline = pipeline(
            MockTextGenerator::new(vec![Ok(value.to_string())]),
            ScriptedImageGenerator::always("QQ=="),
            GenerationParams::default(),
        );
        let observer = RecordingObserver::default();

        let snapshot = pipeline
            .submit_with_cancel(kyoto(3), &CancellationToken::new(), &observer)
            .await;

        assert_eq!(snapshot.status, PipelineStatus::Ready);
        assert_eq!(snapshot.package.unwrap().total_cost, Decimal::new(5000, 0));
        match &observer.audits.lock().unwrap()[0] {
            PriceAudit::Mismatch { difference, .. } => {
                assert_eq!(*difference, Decimal::new(1850, 0))
            }
            other => panic!("Expected mismatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cancel_before_images_gives_placeholders() {
        let pipeline = pipeline(
            MockTextGenerator::new(vec![Ok(package_text("Cancelled", 2))]),
            ScriptedImageGenerator::always("QQ=="),
            GenerationParams::default(),
        );
        let cancel = CancellationToken::new();
        cancel.cancel();

        let snapshot = pipeline
            .submit_with_cancel(kyoto(2), &cancel, &NoProgress)
            .await;

        assert_eq!(snapshot.status, PipelineStatus::Ready);
        assert_eq!(snapshot.package.unwrap().image_count(), 0);
    }

    // ==================== Run isolation ====================

    #[tokio::test]
    async fn test_sequential_runs_do_not_mix() {
        let pipeline = pipeline(
            MockTextGenerator::new(vec![
                Ok(package_text("First Trip", 3)),
                Err(GatewayError::Timeout),
                Ok(package_text("Third Trip", 2)),
            ]),
            ScriptedImageGenerator::always("QQ=="),
            GenerationParams::default(),
        );

        let first = pipeline.submit(kyoto(3)).await;
        assert_eq!(first.run_id, 1);
        assert_eq!(first.package.unwrap().name, "First Trip");

        let second = pipeline.submit(kyoto(3)).await;
        assert_eq!(second.run_id, 2);
        assert_eq!(second.status, PipelineStatus::Failed);
        assert!(second.package.is_none());

        let third = pipeline.submit(kyoto(2)).await;
        assert_eq!(third.run_id, 3);
        assert_eq!(third.package.unwrap().name, "Third Trip");
    }

    #[tokio::test]
    async fn test_superseded_run_never_writes_state() {
        let pipeline = pipeline(
            MockTextGenerator::delayed(vec![
                (Duration::from_millis(150), Ok(package_text("Stale Trip", 3))),
                (Duration::ZERO, Ok(package_text("Fresh Trip", 2))),
            ]),
            ScriptedImageGenerator::always("QQ=="),
            GenerationParams::default(),
        );
        let observer = RecordingObserver::default();

        let cancel = CancellationToken::new();
        let (first, second) = tokio::join!(
            pipeline.submit_with_cancel(kyoto(3), &cancel, &observer),
            async {
                tokio::time::sleep(Duration::from_millis(30)).await;
                pipeline.submit(kyoto(2)).await
            }
        );

        assert_eq!(second.run_id, 2);
        assert_eq!(second.package.as_ref().unwrap().name, "Fresh Trip");

        // The stale run reports the newer run's state instead of its own
        assert_eq!(first.run_id, 2);
        assert_eq!(first.package.unwrap().name, "Fresh Trip");

        let current = pipeline.snapshot();
        assert_eq!(current.run_id, 2);
        assert_eq!(current.package.unwrap().name, "Fresh Trip");

        // Only the first run's start was observed through its observer
        assert_eq!(
            *observer.phases.lock().unwrap(),
            vec![PipelinePhase::GeneratingText]
        );
    }

    #[tokio::test]
    async fn test_run_journal_records_lifecycle() {
        let journal = Arc::new(MemoryJournal::default());
        let pipeline = pipeline(
            MockTextGenerator::new(vec![Ok(package_text("Journaled", 1))]),
            ScriptedImageGenerator::always("QQ=="),
            GenerationParams::default(),
        )
        .with_run_journal(journal.clone());

        pipeline.submit(kyoto(1)).await;

        let kinds = journal.kinds();
        assert_eq!(kinds.first(), Some(&"run_submitted"));
        assert!(kinds.contains(&"price_audit"));
        assert!(kinds.contains(&"image_result"));
        assert_eq!(kinds.last(), Some(&"run_completed"));
        assert!(
            journal
                .events
                .lock()
                .unwrap()
                .iter()
                .all(|(run_id, _)| *run_id == 1)
        );
    }

    #[tokio::test]
    async fn test_superseded_run_failure_is_not_journaled() {
        let journal = Arc::new(MemoryJournal::default());
        let pipeline = pipeline(
            MockTextGenerator::delayed(vec![
                (Duration::from_millis(150), Err(GatewayError::Timeout)),
                (Duration::ZERO, Ok(package_text("Fresh Trip", 2))),
            ]),
            ScriptedImageGenerator::always("QQ=="),
            GenerationParams::default(),
        )
        .with_run_journal(journal.clone());

        let (first, second) = tokio::join!(pipeline.submit(kyoto(3)), async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            pipeline.submit(kyoto(2)).await
        });

        assert_eq!(second.status, PipelineStatus::Ready);
        assert_eq!(first.run_id, 2);
        assert_eq!(first.status, PipelineStatus::Ready);
        assert!(first.error_message.is_none());

        let current = pipeline.snapshot();
        assert_eq!(current.status, PipelineStatus::Ready);
        assert_eq!(current.package.unwrap().name, "Fresh Trip");

        assert!(!journal.kinds().contains(&"run_failed"));
        assert!(
            journal
                .events
                .lock()
                .unwrap()
                .iter()
                .filter(|(run_id, _)| *run_id == 1)
                .all(|(_, kind)| *kind == "run_submitted" || *kind == "phase_changed")
        );
    }
}
