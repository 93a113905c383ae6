//! Randomized subject look (hairstyle + facial features).
//!
//! Sampled once per generation request and reused across every slot in
//! that request, so the synthetic model stays visually consistent between
//! variants. The rng is injected so tests can pin outcomes with a seeded
//! `StdRng`.

use rand::seq::IndexedRandom;
use rand::Rng;

/// Fixed hairstyle enumeration, drawn uniformly.
pub const HAIR_STYLES: &[&str] = &[
    "Short textured crop",
    "Long flowing natural hair",
    "Slicked back ponytail",
    "Buzz cut fade",
    "Shoulder-length sharp bob",
    "Braided intricate hairstyle",
    "Messy chic bun",
    "Curly natural afro",
    "Wavy mid-length hair",
    "Clean side-part",
];

/// Fixed facial-feature enumeration, drawn uniformly.
pub const FACE_FEATURES: &[&str] = &[
    "High cheekbones, sharp jawline",
    "Soft facial features, natural look",
    "Distinct eyebrows, intense gaze",
    "Freckles, warm expression",
    "Angular face structure, model look",
    "Round face, youthful appearance",
    "Strong chin, defined features",
    "Elegant and symmetrical features",
];

/// One sampled hairstyle plus facial-feature descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectLook {
    pub hair: &'static str,
    pub face: &'static str,
}

impl SubjectLook {
    /// Draw hairstyle and facial features independently and uniformly.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        // Both slices are non-empty constants, choose cannot fail.
        let hair = HAIR_STYLES.choose(rng).copied().unwrap_or(HAIR_STYLES[0]);
        let face = FACE_FEATURES.choose(rng).copied().unwrap_or(FACE_FEATURES[0]);
        Self { hair, face }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
