//! Prompt resolution for the generation units.
//!
//! One prompt per requested slot. Model-wearing slots (full body, close-up)
//! share a common studio preamble; the product-only slot ignores the model
//! entirely and branches on product class into four packshot variants with
//! materially different framing/geometry requirements.
//!
//! The geometric anchors below are load-bearing contracts with downstream
//! catalog tooling, not cosmetic wording: square output, the footwear sole
//! baseline at 70% of image height, pair width at 55% of image width, and
//! the two fixed background colors.

use std::sync::OnceLock;

use regex::Regex;

use crate::look::SubjectLook;
use crate::types::{FacialHair, Gender, ImageSlot, ProductClass, SubjectAttributes};

// ---------------------------------------------------------------------------
// Geometry and color contracts
// ---------------------------------------------------------------------------

/// Every slot is generated square.
pub const ASPECT_RATIO: &str = "1:1";

/// Neutral studio background used by pre-processing and the model shots.
pub const STUDIO_BACKGROUND_HEX: &str = "#F6F4F2";

/// Pure white background for catalog packshots.
pub const CATALOG_BACKGROUND_HEX: &str = "#FFFFFF";

/// Footwear packshot: the bottom of the soles sits at this fraction of the
/// image height (30% empty white space below).
pub const SHOE_BASELINE_HEIGHT_PCT: u8 = 70;

/// Footwear packshot: total pair width as a fraction of image width.
pub const SHOE_PAIR_WIDTH_PCT: u8 = 55;

/// Default/clothing packshot: product framed at roughly this width.
pub const PACKSHOT_FRAMING_WIDTH_PCT: u8 = 75;

// ---------------------------------------------------------------------------
// Pre-processing
// ---------------------------------------------------------------------------

/// Instruction for the background-normalization stage: isolate the product
/// and replace the background with the flat studio color.
pub fn background_removal_prompt() -> String {
    format!(
        "Given this image of a fashion product, isolate the product with clean, \
         precise edges. Remove the original background completely. Replace it with \
         a solid, uniform background, specifically the hex color {STUDIO_BACKGROUND_HEX}. \
         The final output must be just the image of the isolated product on the new \
         background. Do not add any text or other elements."
    )
}

// ---------------------------------------------------------------------------
// Style sanitization
// ---------------------------------------------------------------------------

fn outdoor_terms() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new("(?i)outdoor|nature|mountain|street|city").expect("valid literal alternation")
    })
}

/// Replace location-suggesting terms in a style description with "studio
/// fashion", so a lifestyle style never pulls the shot out of the studio.
pub fn sanitize_style_description(description: &str) -> String {
    outdoor_terms()
        .replace_all(description, "studio fashion")
        .into_owned()
}

// ---------------------------------------------------------------------------
// Facial hair
// ---------------------------------------------------------------------------

/// Facial-hair instruction, present only for a male model with an explicit
/// preference. Female subjects and absent preferences yield no instruction.
pub fn facial_hair_instruction(
    gender: Gender,
    facial_hair: Option<FacialHair>,
) -> Option<&'static str> {
    match (gender, facial_hair) {
        (Gender::Male, Some(FacialHair::Stubble)) => Some(
            "The model must have a light stubble beard, well-groomed and masculine.",
        ),
        (Gender::Male, Some(FacialHair::CleanShaven)) => Some(
            "The model must be completely clean-shaven, with absolutely no beard or mustache.",
        ),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Slot prompts
// ---------------------------------------------------------------------------

/// Resolve the prompt for one slot.
///
/// `look` is the per-request sampled hairstyle/facial-feature pair; passing
/// the same look for every slot of a request is what keeps the synthetic
/// model consistent across variants.
pub fn resolve_prompt(
    slot: ImageSlot,
    class: ProductClass,
    subject: &SubjectAttributes,
    look: &SubjectLook,
) -> String {
    match slot {
        ImageSlot::FullBody => full_body_prompt(subject, look),
        ImageSlot::CloseUp => close_up_prompt(class, subject, look),
        ImageSlot::ProductOnly => product_only_prompt(class),
    }
}

/// Shared preamble for the model-wearing slots: subject description, studio
/// constraints, styling rules.
fn model_preamble(subject: &SubjectAttributes, look: &SubjectLook) -> String {
    let beard = facial_hair_instruction(subject.gender, subject.facial_hair).unwrap_or("");
    let gender = match subject.gender {
        Gender::Male => "male",
        Gender::Female => "female",
    };
    let style_description = sanitize_style_description(&subject.style.description);

    format!(
        "You are a world-class fashion photographer working for a luxury brand.\n\
         **Task:** Create a premium e-commerce photo of a model wearing the provided product.\n\
         \n\
         **Input:** Use the product shown in the image. The product MUST be perfectly \
         preserved (color, texture, logo, shape).\n\
         \n\
         **Model:**\n\
         - Gender: {gender}.\n\
         - Ethnicity: {ethnicity}.\n\
         - **Hair:** {hair}.\n\
         - **Face:** {face}. {beard}\n\
         - Look: Professional, fit, elegant.\n\
         - Style: {style_name} ({style_description}).\n\
         - Outfit: The model is wearing the product.\n\
         - **CRITICAL STYLING RULE:** If the product is a jacket, coat, down jacket, or \
         shirt, the model MUST wear it FULLY CLOSED (zipped up or buttoned up). Do not \
         style it open.\n\
         - **Pairing:** Paired with a trendy mix of casual chic items to create a \
         high-end look resembling luxury fashion catalogs (clean, minimalist, premium).\n\
         \n\
         **Studio Setting (ABSOLUTE PRIORITY - NON-NEGOTIABLE):**\n\
         - **LOCATION:** The shoot takes place in a WINDOWLESS INDOOR PHOTO STUDIO.\n\
         - **Background:** SOLID, FLAT, MATTE, UNIFORM BACKGROUND. Color hex code \
         strictly {background}.\n\
         - **Texture:** Perfectly smooth wall paint. No clouds, no gradients, no \
         texture, no outdoors.\n\
         - **NEGATIVE CONSTRAINTS:** ABSOLUTELY NO NATURE. Do NOT generate mountains, \
         sky, snow, grass, rocks, trees, streets, buildings, or rooms.\n\
         - **Override:** Ignore any location suggestions from the style theme. The \
         theme applies ONLY to the model's outfit and attitude, NOT the environment.\n\
         - **Output:** A flattened square image with NO alpha channel.\n\
         \n\
         **Quality:** Photorealistic, highly detailed, masterpiece.",
        ethnicity = subject.ethnicity.as_str(),
        hair = look.hair,
        face = look.face,
        style_name = subject.style.name,
        background = STUDIO_BACKGROUND_HEX,
    )
}

fn full_body_prompt(subject: &SubjectAttributes, look: &SubjectLook) -> String {
    format!(
        "{preamble}\n\
         **Shot Type:** Full Body Shot (or 3/4 length).\n\
         **Instructions:** The model is standing confidently. Ensure the product is \
         fully visible and naturally worn. The pose should be elegant and strong, \
         centered in the square frame.",
        preamble = model_preamble(subject, look),
    )
}

fn close_up_prompt(class: ProductClass, subject: &SubjectAttributes, look: &SubjectLook) -> String {
    let framing = match class {
        ProductClass::Shoes => {
            "Camera at ankle height. Focus on the shoes on the model's feet. Show the \
             interaction with the pants cuff."
        }
        _ => {
            "Frame the shot from the chin to the hips. Focus on the chest/torso area \
             where the product is worn. Cut the head just above the chin to focus on \
             the garment."
        }
    };

    format!(
        "{preamble}\n\
         **Shot Type:** Close-Up on Model (Zoomed In).\n\
         **Instructions:**\n\
         - **Core Requirement:** The product MUST be worn by the model. This is NOT a \
         product-only shot; it is a detail shot of the model wearing the item.\n\
         - **Framing & Zoom:** Significant zoom on the product itself to show texture \
         and details. {framing}\n\
         - **Composition:** The product is the main subject, filling most of the \
         square frame, but the model's body provides the structure and fit.",
        preamble = model_preamble(subject, look),
    )
}

/// The product-only packshot, branching on product class: default, clothing
/// (ghost-mannequin, no shadows), footwear (grid-locked side profile), and
/// leather goods (fixed elevation and lens framing).
fn product_only_prompt(class: ProductClass) -> String {
    match class {
        ProductClass::Shoes => shoe_packshot_prompt(),
        ProductClass::Clothing => clothing_packshot_prompt(),
        ProductClass::Leather => leather_packshot_prompt(),
    }
}

/// Default packshot variant: centered front-facing product on pure white.
/// Used when no category-specific variant applies.
pub fn default_packshot_prompt() -> String {
    format!(
        "You are an AI specialized in E-commerce Packshots.\n\
         **Task:** Generate a perfectly isolated product on a pure white background.\n\
         \n\
         **Instructions for the final image:**\n\
         1. **Composition:** Square format ({ASPECT_RATIO}).\n\
         2. **Angle:** Front-facing.\n\
         3. **Background:** SOLID PURE WHITE ({CATALOG_BACKGROUND_HEX}). Digital \
         background replacement; uniformly white everywhere. No gradients, no \
         shadows, no floor, no vignette.\n\
         4. **Lighting:** Neutral, even studio lighting.\n\
         5. **Framing:** Centered, approx {PACKSHOT_FRAMING_WIDTH_PCT}% width.\n\
         6. **Fidelity:** Perfect replica of the product."
    )
}

fn clothing_packshot_prompt() -> String {
    format!(
        "You are an AI specialized in E-commerce Packshots.\n\
         **Task:** Generate a perfectly isolated clothing item on a pure white background.\n\
         \n\
         **Instructions for the final image:**\n\
         1. **Subject:** The clothing item provided.\n\
         2. **Angle:** Perfect front-facing, straight on.\n\
         3. **Background:** SOLID PURE WHITE ({CATALOG_BACKGROUND_HEX}). Digital \
         background replacement — do NOT render a floor or wall.\n\
         4. **Shadows:** NO SHADOWS. Flat lay / ghost mannequin style.\n\
         5. **Framing:** Centered, approx {PACKSHOT_FRAMING_WIDTH_PCT}% width."
    )
}

fn shoe_packshot_prompt() -> String {
    format!(
        "You are an AI specialized in Technical E-commerce Photography.\n\
         **Task:** Generate a standardized catalog image of a pair of shoes with \
         strict geometric consistency.\n\
         \n\
         **CRITICAL: YOU MUST ALIGN THE SHOES TO A FIXED VIRTUAL GRID.**\n\
         \n\
         1. **Camera & Geometry (GRID LOCK):**\n\
         - **View:** PURE SIDE PROFILE.\n\
         - **Orientation:** Pointing RIGHT.\n\
         - **Camera Position:** GROUND LEVEL (0 degrees), perfectly parallel to the \
         ground. NOT looking down.\n\
         - **Horizontal Alignment:** The soles must be perfectly flat and parallel to \
         the horizon.\n\
         - **Vertical Anchor (Flotation Line):** The bottom of the soles MUST be \
         positioned at {SHOE_BASELINE_HEIGHT_PCT}% of the image height (meaning \
         30% of the image is empty white space BELOW the shoes).\n\
         - **Scale (Width):** The total width of the pair (foreground + background \
         shoe) must occupy EXACTLY {SHOE_PAIR_WIDTH_PCT}% of the image width.\n\
         \n\
         2. **Subject Arrangement:**\n\
         - **Pose:** STAGGERED PROFILE. One shoe in the foreground (fully visible \
         profile), the other slightly behind and offset, both pointing RIGHT.\n\
         \n\
         3. **Background & Lighting:**\n\
         - **BACKGROUND:** SOLID {CATALOG_BACKGROUND_HEX} (pure white). Digital \
         background replacement — do NOT photograph a floor.\n\
         - **LIGHTING:** Soft, even, studio lighting.\n\
         \n\
         4. **Shadows:**\n\
         - **TYPE:** Soft contact shadow only, grounding the shoes at the \
         {SHOE_BASELINE_HEIGHT_PCT}% line.\n\
         - **APPEARANCE:** A small, blurred light gray shadow directly under the \
         soles, fading quickly into the pure white background."
    )
}

fn leather_packshot_prompt() -> String {
    format!(
        "You are an AI specialized in E-commerce Packshots.\n\
         **Task:** Generate a perfectly isolated leather product on a pure white background.\n\
         \n\
         1. **Subject:** The specific bag/wallet/accessory provided. Exact replica of \
         material and details.\n\
         \n\
         2. **Geometry (LOCKED):**\n\
         - **View:** Front view, slightly elevated (approx 15 degrees).\n\
         - **Lens:** 85mm (flat perspective).\n\
         - **Scale:** Product width is approx 50-60% of image width.\n\
         - **Centering:** Perfectly centered.\n\
         \n\
         3. **Background & Lighting:**\n\
         - **BACKGROUND:** SOLID {CATALOG_BACKGROUND_HEX} (pure white). Digital \
         background replacement — do NOT photograph a floor.\n\
         - **LIGHTING:** Soft, even, studio lighting.\n\
         \n\
         4. **Shadows:**\n\
         - **TYPE:** Soft contact shadow (ambient occlusion), strictly underneath the \
         object, low opacity, no outward cast shadows."
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
