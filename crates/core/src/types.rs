//! Core types for generation requests and results.
//!
//! Wire naming is camelCase to match the JSON contract of the studio-photo
//! API (`productOnly`, `fullBody`, `closeUp`).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// One independently generated output variant.
///
/// Every request draws its slots from this closed set. Slot outcomes are
/// commutative: no ordering is guaranteed between them, [`ImageSlot::ALL`]
/// is a display convention only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageSlot {
    /// Isolated product packshot on pure white.
    ProductOnly,
    /// Model wearing the product, full body or 3/4 length.
    FullBody,
    /// Zoomed detail shot of the product worn by the model.
    CloseUp,
}

impl ImageSlot {
    /// All slots in display order.
    pub const ALL: [ImageSlot; 3] = [ImageSlot::ProductOnly, ImageSlot::FullBody, ImageSlot::CloseUp];

    /// Wire/display name of the slot.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSlot::ProductOnly => "productOnly",
            ImageSlot::FullBody => "fullBody",
            ImageSlot::CloseUp => "closeUp",
        }
    }
}

impl fmt::Display for ImageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Product and subject attributes
// ---------------------------------------------------------------------------

/// Product category. Determines which prompt family applies, most
/// significantly for the [`ImageSlot::ProductOnly`] composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductClass {
    Clothing,
    Shoes,
    Leather,
}

impl ProductClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductClass::Clothing => "clothing",
            ProductClass::Shoes => "shoes",
            ProductClass::Leather => "leather",
        }
    }
}

/// Synthetic model gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Synthetic model ethnicity/origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ethnicity {
    Maghrebi,
    African,
    Latin,
    Asian,
    European,
}

impl Ethnicity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ethnicity::Maghrebi => "Maghrebi",
            Ethnicity::African => "African",
            Ethnicity::Latin => "Latin",
            Ethnicity::Asian => "Asian",
            Ethnicity::European => "European",
        }
    }
}

/// Explicit facial-hair preference. Only meaningful for [`Gender::Male`];
/// the prompt layer gates on gender, callers may pass anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacialHair {
    /// Light, well-groomed stubble.
    #[serde(rename = "beard")]
    Stubble,
    /// Completely clean-shaven.
    #[serde(rename = "no_beard")]
    CleanShaven,
}

/// A named visual style drawn from the per-category catalogs in
/// [`crate::styles`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub name: String,
    pub description: String,
}

/// Everything describing the synthetic model for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectAttributes {
    pub gender: Gender,
    pub ethnicity: Ethnicity,
    /// Nullable; omitted instruction entirely when absent or when the
    /// gender is not male.
    pub facial_hair: Option<FacialHair>,
    pub style: Style,
}

// ---------------------------------------------------------------------------
// Image payloads
// ---------------------------------------------------------------------------

/// An encoded image crossing the generation boundary.
///
/// The payload stays opaque base64 end to end; nothing in this workspace
/// decodes pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedImage {
    /// Base64-encoded image bytes.
    pub data: String,
    /// MIME type, e.g. `image/png`.
    pub mime_type: String,
}

impl EncodedImage {
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// A PNG payload, the default for generated output.
    pub fn png(data: impl Into<String>) -> Self {
        Self::new(data, "image/png")
    }

    /// Encode raw image bytes, as held by the pending store, into the
    /// base64 wire form.
    pub fn from_bytes(raw: &[u8], mime_type: impl Into<String>) -> Self {
        use base64::Engine as _;
        Self::new(base64::engine::general_purpose::STANDARD.encode(raw), mime_type)
    }
}

// ---------------------------------------------------------------------------
// Generation request
// ---------------------------------------------------------------------------

/// One orchestration request: a background-normalized reference image fanned
/// out to the requested slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// The processed (background-normalized) reference image. All slots
    /// anchor on this single payload.
    pub reference_image: EncodedImage,
    pub product_class: ProductClass,
    pub subject: SubjectAttributes,
    /// Requested output slots. Must be non-empty.
    pub slots: Vec<ImageSlot>,
}

impl GenerationRequest {
    /// Validate structural invariants: at least one slot, non-empty payload.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.slots.is_empty() {
            return Err(CoreError::Validation(
                "At least one slot must be requested".to_string(),
            ));
        }
        if self.reference_image.data.is_empty() {
            return Err(CoreError::Validation(
                "Reference image payload must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Copy of this request restricted to a single slot, for regeneration.
    pub fn for_slot(&self, slot: ImageSlot) -> Self {
        Self {
            slots: vec![slot],
            ..self.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// Generated image set
// ---------------------------------------------------------------------------

/// Sparse mapping from slot to generated image. A slot is present only if
/// its generation unit succeeded; the failure list travels separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImageSet(BTreeMap<ImageSlot, EncodedImage>);

impl GeneratedImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, slot: ImageSlot, image: EncodedImage) {
        self.0.insert(slot, image);
    }

    pub fn get(&self, slot: ImageSlot) -> Option<&EncodedImage> {
        self.0.get(&slot)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Slots present in this set, in [`ImageSlot`] order.
    pub fn slots(&self) -> impl Iterator<Item = ImageSlot> + '_ {
        self.0.keys().copied()
    }

    /// Right-biased merge: slots present in `newer` overwrite this set,
    /// slots absent in `newer` are preserved untouched.
    pub fn merge(&mut self, newer: GeneratedImageSet) {
        self.0.extend(newer.0);
    }
}

impl FromIterator<(ImageSlot, EncodedImage)> for GeneratedImageSet {
    fn from_iter<I: IntoIterator<Item = (ImageSlot, EncodedImage)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
