//! Key/value configuration-store collaborator contract.
//!
//! The core only needs point reads and writes keyed by opaque strings;
//! no range queries. `upsert` is a first-class idempotent operation so
//! callers never race a PUT-then-POST fallback themselves.

pub mod http;
pub mod memory;
mod store;

pub use http::HttpConfigStore;
pub use memory::MemoryConfigStore;
pub use store::{ConfigEntry, ConfigStore, ConfigStoreError};
