/// Domain-level errors. All variants are local and recoverable: the
/// operation that raised one has not mutated any state.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Adding another pending image would exceed the configured maximum
    /// (committed references plus pending items).
    #[error("Image limit reached: at most {max} images per product")]
    Capacity { max: usize },

    /// A reorder index is outside the pending sequence.
    #[error("Index {index} out of range for {len} pending images")]
    Range { index: usize, len: usize },

    /// A request failed structural validation.
    #[error("Validation failed: {0}")]
    Validation(String),
}
