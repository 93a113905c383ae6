//! Client for the external image-synthesis service.
//!
//! The orchestrator consumes the service through the [`ImageGenerator`]
//! trait: one reference image plus one prompt in, one encoded image or a
//! failure out, per unit of work. No batching is assumed or required.
//! [`client::GenAiClient`] is the production implementation talking to a
//! Gemini-style `generateContent` REST endpoint.

pub mod client;
pub mod generator;

pub use client::GenAiClient;
pub use generator::{GenAiError, ImageGenerator};
