//! HTTP surface for the packshot studio.
//!
//! Two operations: pre-process a raw product photo (background
//! normalization) and generate the multi-variant packshot set. Everything
//! else about the surrounding application lives elsewhere.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
