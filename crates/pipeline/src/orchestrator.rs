//! Concurrent multi-variant generation orchestrator.
//!
//! Translates one [`GenerationRequest`] into one independent generation
//! unit per requested slot, fires all units concurrently, and collects
//! per-slot success/failure independently. Regenerating a single slot is
//! the same execution with the slot set restricted to one key; the caller
//! merges the outcome into its accumulated [`GeneratedImageSet`] via the
//! right-biased merge rule. The orchestrator holds no mutable state across
//! invocations and never edits a caller's existing set in place.

use std::sync::Arc;

use futures::future::join_all;
use rand::Rng;

use packshot_core::error::CoreError;
use packshot_core::look::SubjectLook;
use packshot_core::prompt::resolve_prompt;
use packshot_core::types::{GeneratedImageSet, GenerationRequest, ImageSlot};
use packshot_genai::{GenAiError, ImageGenerator};

use crate::preprocess;

/// One slot's failure, surfaced to the caller so a sparse result map can be
/// told apart from a slot that was never requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotFailure {
    pub slot: ImageSlot,
    /// Opaque failure reason from the generation service.
    pub reason: String,
}

/// Result of one orchestration call: the slots that succeeded plus the
/// slots that failed. `failures` is empty on a clean run.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub images: GeneratedImageSet,
    pub failures: Vec<SlotFailure>,
}

/// Errors that abort an orchestration call entirely.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The request failed structural validation.
    #[error(transparent)]
    InvalidRequest(#[from] CoreError),

    /// The background-normalization stage failed. Fatal: no generation
    /// unit is launched without a normalized reference.
    #[error("Pre-processing failed: {0}")]
    Preprocess(#[source] GenAiError),

    /// Every requested slot failed. Distinct from a partial result, which
    /// is returned as a successful [`GenerationOutcome`].
    #[error("All {} requested generation units failed", .failures.len())]
    AllSlotsFailed { failures: Vec<SlotFailure> },
}

/// The orchestrator. Cheap to clone into handlers via `Arc`.
pub struct Orchestrator {
    generator: Arc<dyn ImageGenerator>,
}

impl Orchestrator {
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self { generator }
    }

    /// Normalize a raw reference image. Must succeed before
    /// [`generate`](Self::generate) is meaningful.
    pub async fn preprocess(
        &self,
        raw: &packshot_core::types::EncodedImage,
    ) -> Result<packshot_core::types::EncodedImage, PipelineError> {
        preprocess::preprocess(self.generator.as_ref(), raw).await
    }

    /// Run one orchestration call with thread-local randomness for the
    /// subject look.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutcome, PipelineError> {
        let look = SubjectLook::sample(&mut rand::rng());
        self.generate_with_look(request, &look).await
    }

    /// Same as [`generate`](Self::generate) with an injected rng, so tests
    /// pin the sampled look deterministically.
    pub async fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> Result<GenerationOutcome, PipelineError> {
        let look = SubjectLook::sample(rng);
        self.generate_with_look(request, &look).await
    }

    /// Run one orchestration call and fold the outcome into a previously
    /// accumulated set. The existing set is taken by value and returned
    /// updated; new images win over prior ones per slot.
    pub async fn generate_merged(
        &self,
        request: &GenerationRequest,
        mut accumulated: GeneratedImageSet,
    ) -> Result<(GeneratedImageSet, Vec<SlotFailure>), PipelineError> {
        let outcome = self.generate(request).await?;
        accumulated.merge(outcome.images);
        Ok((accumulated, outcome.failures))
    }

    /// Core execution: resolve one prompt per slot with the single sampled
    /// look, fire all units concurrently, collect outcomes independently.
    async fn generate_with_look(
        &self,
        request: &GenerationRequest,
        look: &SubjectLook,
    ) -> Result<GenerationOutcome, PipelineError> {
        request.validate()?;

        // Requested slots form a set; drop duplicates, keep first-seen order.
        let mut slots: Vec<ImageSlot> = Vec::with_capacity(request.slots.len());
        for slot in &request.slots {
            if !slots.contains(slot) {
                slots.push(*slot);
            }
        }

        tracing::info!(
            product_class = request.product_class.as_str(),
            slot_count = slots.len(),
            "Dispatching generation units",
        );

        let units = slots.iter().map(|&slot| {
            let prompt = resolve_prompt(slot, request.product_class, &request.subject, look);
            let generator = Arc::clone(&self.generator);
            let reference = &request.reference_image;
            async move { (slot, generator.generate(reference, &prompt).await) }
        });

        // Single suspension point: all units in flight at once, outcomes
        // collected without cross-slot cancellation.
        let outcomes = join_all(units).await;

        let mut images = GeneratedImageSet::new();
        let mut failures = Vec::new();
        for (slot, outcome) in outcomes {
            match outcome {
                Ok(image) => {
                    tracing::info!(slot = %slot, "Generation unit succeeded");
                    images.insert(slot, image);
                }
                Err(e) => {
                    tracing::warn!(slot = %slot, error = %e, "Generation unit failed");
                    failures.push(SlotFailure {
                        slot,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if images.is_empty() {
            tracing::error!(
                slot_count = failures.len(),
                "All generation units failed",
            );
            return Err(PipelineError::AllSlotsFailed { failures });
        }

        Ok(GenerationOutcome { images, failures })
    }
}

// ---------------------------------------------------------------------------
// Test support
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests_support {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use packshot_core::types::EncodedImage;
    use packshot_genai::{GenAiError, ImageGenerator};

    /// Succeeds for every prompt with a fixed payload; records prompts.
    pub struct FixedGenerator {
        payload: String,
        prompts: Mutex<Vec<String>>,
    }

    impl FixedGenerator {
        pub fn returning(payload: &str) -> Self {
            Self {
                payload: payload.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ImageGenerator for FixedGenerator {
        async fn generate(
            &self,
            _reference: &EncodedImage,
            prompt: &str,
        ) -> Result<EncodedImage, GenAiError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(EncodedImage::png(self.payload.clone()))
        }
    }

    /// Fails every call with a service error carrying a fixed reason.
    pub struct FailingGenerator {
        reason: String,
    }

    impl FailingGenerator {
        pub fn new(reason: &str) -> Self {
            Self {
                reason: reason.to_string(),
            }
        }
    }

    #[async_trait]
    impl ImageGenerator for FailingGenerator {
        async fn generate(
            &self,
            _reference: &EncodedImage,
            _prompt: &str,
        ) -> Result<EncodedImage, GenAiError> {
            Err(GenAiError::Api {
                status: 500,
                body: self.reason.clone(),
            })
        }
    }

    /// Fails for the prompts matching a marker substring, succeeds otherwise.
    pub struct SelectiveGenerator {
        fail_on: String,
    }

    impl SelectiveGenerator {
        pub fn failing_on(marker: &str) -> Self {
            Self {
                fail_on: marker.to_string(),
            }
        }
    }

    #[async_trait]
    impl ImageGenerator for SelectiveGenerator {
        async fn generate(
            &self,
            _reference: &EncodedImage,
            prompt: &str,
        ) -> Result<EncodedImage, GenAiError> {
            if prompt.contains(&self.fail_on) {
                Err(GenAiError::Api {
                    status: 503,
                    body: "upstream unavailable".to_string(),
                })
            } else {
                // Echo a prompt fingerprint so tests can tell slots apart.
                Ok(EncodedImage::png(format!("len-{}", prompt.len())))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::tests_support::{FailingGenerator, FixedGenerator, SelectiveGenerator};
    use super::*;
    use assert_matches::assert_matches;
    use packshot_core::types::{
        EncodedImage, Ethnicity, Gender, ProductClass, Style, SubjectAttributes,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn request(class: ProductClass, slots: Vec<ImageSlot>) -> GenerationRequest {
        GenerationRequest {
            reference_image: EncodedImage::png("cmVmZXJlbmNl"),
            product_class: class,
            subject: SubjectAttributes {
                gender: Gender::Male,
                ethnicity: Ethnicity::Maghrebi,
                facial_hair: None,
                style: Style {
                    name: "Classic Studio".to_string(),
                    description: "Model standing, classic studio shot.".to_string(),
                },
            },
            slots,
        }
    }

    fn orchestrator(generator: impl ImageGenerator + 'static) -> Orchestrator {
        Orchestrator::new(Arc::new(generator))
    }

    // -- Happy path --

    #[tokio::test]
    async fn all_requested_slots_are_generated() {
        let orch = orchestrator(FixedGenerator::returning("aW1n"));
        let req = request(ProductClass::Clothing, ImageSlot::ALL.to_vec());

        let outcome = orch.generate(&req).await.unwrap();

        assert_eq!(outcome.images.len(), 3);
        assert!(outcome.failures.is_empty());
        for slot in ImageSlot::ALL {
            assert!(outcome.images.get(slot).is_some(), "{slot}");
        }
    }

    #[tokio::test]
    async fn one_unit_per_slot_no_duplicates() {
        let gen = Arc::new(FixedGenerator::returning("aW1n"));
        let orch = Orchestrator::new(Arc::clone(&gen) as Arc<dyn ImageGenerator>);
        let req = request(
            ProductClass::Clothing,
            vec![ImageSlot::FullBody, ImageSlot::FullBody, ImageSlot::CloseUp],
        );

        let outcome = orch.generate(&req).await.unwrap();

        assert_eq!(outcome.images.len(), 2);
        assert_eq!(gen.prompts().len(), 2);
    }

    // -- Partial failure --

    #[tokio::test]
    async fn one_slot_failing_yields_partial_set_and_failure_list() {
        // Only the footwear packshot prompt mentions the virtual grid, so
        // the product-only unit fails while the model shots succeed.
        let orch = orchestrator(SelectiveGenerator::failing_on("FIXED VIRTUAL GRID"));
        let req = request(ProductClass::Shoes, ImageSlot::ALL.to_vec());

        let outcome = orch.generate(&req).await.unwrap();

        assert_eq!(outcome.images.len(), 2);
        assert!(outcome.images.get(ImageSlot::ProductOnly).is_none());
        assert!(outcome.images.get(ImageSlot::FullBody).is_some());
        assert!(outcome.images.get(ImageSlot::CloseUp).is_some());

        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].slot, ImageSlot::ProductOnly);
        assert!(outcome.failures[0].reason.contains("503"));
    }

    #[tokio::test]
    async fn all_slots_failing_is_a_fatal_aggregate_error() {
        let orch = orchestrator(FailingGenerator::new("down"));
        let req = request(ProductClass::Clothing, ImageSlot::ALL.to_vec());

        let err = orch.generate(&req).await.unwrap_err();
        assert_matches!(
            err,
            PipelineError::AllSlotsFailed { ref failures } if failures.len() == 3
        );
    }

    // -- Validation --

    #[tokio::test]
    async fn empty_slot_set_is_rejected() {
        let orch = orchestrator(FixedGenerator::returning("aW1n"));
        let req = request(ProductClass::Clothing, vec![]);

        let err = orch.generate(&req).await.unwrap_err();
        assert_matches!(err, PipelineError::InvalidRequest(_));
    }

    // -- Look consistency --

    #[tokio::test]
    async fn slots_of_one_request_share_the_sampled_look() {
        let gen = Arc::new(FixedGenerator::returning("aW1n"));
        let orch = Orchestrator::new(Arc::clone(&gen) as Arc<dyn ImageGenerator>);
        let req = request(
            ProductClass::Clothing,
            vec![ImageSlot::FullBody, ImageSlot::CloseUp],
        );

        let mut rng = StdRng::seed_from_u64(11);
        orch.generate_with_rng(&req, &mut rng).await.unwrap();

        let expected = SubjectLook::sample(&mut StdRng::seed_from_u64(11));
        for prompt in gen.prompts() {
            assert!(prompt.contains(expected.hair));
            assert!(prompt.contains(expected.face));
        }
    }

    // -- Regeneration --

    #[tokio::test]
    async fn regenerating_one_slot_merges_without_touching_others() {
        let orch = orchestrator(FixedGenerator::returning("bmV3"));

        // Previously accumulated set, owned by the caller.
        let accumulated: GeneratedImageSet = [
            (ImageSlot::ProductOnly, EncodedImage::png("b2xk")),
            (ImageSlot::FullBody, EncodedImage::png("a2VwdA==")),
        ]
        .into_iter()
        .collect();

        let req = request(ProductClass::Clothing, ImageSlot::ALL.to_vec())
            .for_slot(ImageSlot::ProductOnly);
        let (accumulated, failures) = orch.generate_merged(&req, accumulated).await.unwrap();

        assert!(failures.is_empty());
        assert_eq!(accumulated.len(), 2);
        assert_eq!(accumulated.get(ImageSlot::ProductOnly).unwrap().data, "bmV3");
        assert_eq!(
            accumulated.get(ImageSlot::FullBody).unwrap().data,
            "a2VwdA=="
        );
    }
}
