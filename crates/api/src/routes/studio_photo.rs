//! Studio-photo endpoints: background normalization and multi-variant
//! generation.
//!
//! Wire naming matches the original dashboard contract (`processedImage`,
//! `modelGender`, `keysToGenerate`, slot keys `productOnly` / `fullBody` /
//! `closeUp`).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use packshot_core::types::{
    EncodedImage, Ethnicity, FacialHair, Gender, GeneratedImageSet, GenerationRequest, ImageSlot,
    ProductClass, Style, SubjectAttributes,
};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Pre-processing
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    /// Raw product photo, as selected by the user.
    pub image: EncodedImage,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    /// Background-normalized reference image.
    pub processed_image: EncodedImage,
}

/// `POST /api/studio-photo/process`
pub async fn process(
    State(state): State<AppState>,
    Json(body): Json<ProcessRequest>,
) -> AppResult<Json<ProcessResponse>> {
    if body.image.data.is_empty() {
        return Err(AppError::BadRequest("No image provided".to_string()));
    }

    let processed_image = state.orchestrator.preprocess(&body.image).await?;
    Ok(Json(ProcessResponse { processed_image }))
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Output of the pre-processing stage.
    pub processed_image: EncodedImage,
    pub product_type: ProductClass,
    pub model_gender: Gender,
    pub model_ethnicity: Ethnicity,
    #[serde(default)]
    pub model_beard: Option<FacialHair>,
    pub style: Style,
    /// Slots to generate; defaults to all three.
    #[serde(default = "all_slots")]
    pub keys_to_generate: Vec<ImageSlot>,
}

fn all_slots() -> Vec<ImageSlot> {
    ImageSlot::ALL.to_vec()
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// Successful slots only; a slot is absent when it was not requested
    /// or when it failed. `failures` carries the distinction.
    pub images: GeneratedImageSet,
    pub failures: Vec<SlotFailureBody>,
}

#[derive(Debug, Serialize)]
pub struct SlotFailureBody {
    pub slot: ImageSlot,
    pub reason: String,
}

/// `POST /api/studio-photo/generate`
pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> AppResult<Json<GenerateResponse>> {
    let request = GenerationRequest {
        reference_image: body.processed_image,
        product_class: body.product_type,
        subject: SubjectAttributes {
            gender: body.model_gender,
            ethnicity: body.model_ethnicity,
            facial_hair: body.model_beard,
            style: body.style,
        },
        slots: body.keys_to_generate,
    };

    let outcome = state.orchestrator.generate(&request).await?;

    Ok(Json(GenerateResponse {
        images: outcome.images,
        failures: outcome
            .failures
            .into_iter()
            .map(|f| SlotFailureBody {
                slot: f.slot,
                reason: f.reason,
            })
            .collect(),
    }))
}
