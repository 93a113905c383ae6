//! Domain logic for the packshot studio: pending-media bookkeeping,
//! persisted-gallery edits, and prompt resolution for multi-variant
//! product photo generation.
//!
//! This crate performs no I/O. The external generation service lives in
//! `packshot-genai`, the concurrent fan-out in `packshot-pipeline`.

pub mod error;
pub mod look;
pub mod pending;
pub mod prompt;
pub mod sequence;
pub mod styles;
pub mod types;
