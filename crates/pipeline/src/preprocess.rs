//! Background-normalization stage.
//!
//! One preliminary call that turns the raw reference image into the
//! background-normalized anchor every slot generates from. Runs before any
//! generation unit is launched; its failure is fatal to the whole request,
//! since no partial outcome is meaningful without a normalized reference.

use packshot_core::prompt::background_removal_prompt;
use packshot_core::types::EncodedImage;
use packshot_genai::ImageGenerator;

use crate::orchestrator::PipelineError;

/// Normalize the background of a raw reference image.
pub async fn preprocess<G: ImageGenerator + ?Sized>(
    generator: &G,
    raw: &EncodedImage,
) -> Result<EncodedImage, PipelineError> {
    let prompt = background_removal_prompt();
    let processed = generator
        .generate(raw, &prompt)
        .await
        .map_err(PipelineError::Preprocess)?;

    tracing::info!(
        mime_type = %processed.mime_type,
        "Reference image background normalized",
    );
    Ok(processed)
}
