//! Generation pipeline: sequential pre-processing followed by a concurrent
//! fan-out of one generation unit per requested slot.
//!
//! Slot outcomes are independent; one slot's failure never cancels or
//! invalidates another's. A partial result (some slots succeeded) is a
//! success with a failure list; a total failure (every slot failed, or
//! pre-processing failed) is a single aggregate error.

pub mod orchestrator;
pub mod preprocess;

pub use orchestrator::{GenerationOutcome, Orchestrator, PipelineError, SlotFailure};
pub use preprocess::preprocess;
