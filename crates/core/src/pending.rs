//! Deferred-upload bookkeeping for user-selected media.
//!
//! [`PendingImageStore`] owns the images a user has selected but not yet
//! committed to permanent storage, plus an ephemeral preview handle per
//! image. Handles are released through [`Preview`]'s `Drop` impl, so a
//! handle is released exactly once no matter how an item leaves the store
//! (individual removal, `clear`, `reset`, or the store itself being
//! dropped).
//!
//! The store is an explicitly owned object with a per-editing-session
//! lifecycle. It never performs network or persistence calls; committing
//! the raw bytes to storage is the caller's job.

use std::sync::Arc;

use crate::error::CoreError;

/// Default cap on committed references plus pending images per product.
pub const DEFAULT_MAX_IMAGES: usize = 8;

// ---------------------------------------------------------------------------
// Preview handles
// ---------------------------------------------------------------------------

/// Allocator for ephemeral, display-only preview handles.
///
/// Implementations pair `allocate` and `release`; the store guarantees the
/// pairing by owning every handle it allocates.
pub trait PreviewAllocator: Send + Sync {
    /// Allocate a preview handle for the given raw image bytes.
    fn allocate(&self, raw: &[u8]) -> String;

    /// Release a previously allocated handle. Called exactly once per
    /// allocated handle.
    fn release(&self, handle: &str);
}

/// An allocated preview handle, released on drop.
///
/// Exclusively owned by the store; the handle string is only ever read
/// while the guard is alive, and the guard cannot be cloned, so a released
/// handle can neither be read again nor released twice.
pub struct Preview {
    handle: String,
    allocator: Arc<dyn PreviewAllocator>,
}

impl Preview {
    fn new(allocator: Arc<dyn PreviewAllocator>, raw: &[u8]) -> Self {
        let handle = allocator.allocate(raw);
        Self { handle, allocator }
    }

    /// The display-only handle value.
    pub fn handle(&self) -> &str {
        &self.handle
    }
}

impl Drop for Preview {
    fn drop(&mut self) {
        self.allocator.release(&self.handle);
    }
}

impl std::fmt::Debug for Preview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preview")
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Pending images
// ---------------------------------------------------------------------------

/// One user-selected image awaiting upload.
#[derive(Debug)]
pub struct PendingImage {
    id: String,
    raw: Vec<u8>,
    preview: Preview,
}

impl PendingImage {
    /// Opaque unique id of this item.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The original, unmodified source payload. Handed to the external
    /// uploader by the caller; never mutated here.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// The ephemeral preview handle for local display.
    pub fn preview(&self) -> &str {
        self.preview.handle()
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Ordered set of pending images plus an optional mirror of the committed
/// reference sequence (for the capacity check only; the canonical sequence
/// is owned by the caller).
pub struct PendingImageStore {
    pending: Vec<PendingImage>,
    /// Mirror of already-committed references. Counts toward capacity.
    committed: Vec<String>,
    allocator: Arc<dyn PreviewAllocator>,
    max_images: usize,
}

impl PendingImageStore {
    /// Create a store for one editing session.
    pub fn new(allocator: Arc<dyn PreviewAllocator>, max_images: usize) -> Self {
        Self {
            pending: Vec::new(),
            committed: Vec::new(),
            allocator,
            max_images,
        }
    }

    /// Create a store with the default [`DEFAULT_MAX_IMAGES`] cap.
    pub fn with_default_capacity(allocator: Arc<dyn PreviewAllocator>) -> Self {
        Self::new(allocator, DEFAULT_MAX_IMAGES)
    }

    /// Append a newly selected image and allocate its preview handle.
    ///
    /// Fails with [`CoreError::Capacity`], without mutating anything, when
    /// committed plus pending already meets the configured maximum.
    /// Returns the item id (caller-supplied or generated).
    pub fn add(&mut self, raw: Vec<u8>, id: Option<String>) -> Result<String, CoreError> {
        if self.committed.len() + self.pending.len() >= self.max_images {
            return Err(CoreError::Capacity {
                max: self.max_images,
            });
        }

        let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string());
        let preview = Preview::new(Arc::clone(&self.allocator), &raw);
        self.pending.push(PendingImage {
            id: id.clone(),
            raw,
            preview,
        });
        Ok(id)
    }

    /// Remove an item by id, releasing its preview handle. Absent ids are
    /// a no-op, not an error, so repeated removal is safe.
    pub fn remove(&mut self, id: &str) {
        if let Some(pos) = self.pending.iter().position(|img| img.id == id) {
            // Dropping the removed item releases its preview.
            self.pending.remove(pos);
        }
    }

    /// Move the pending item at `from` so it ends up at position `to`.
    ///
    /// A positional move (remove-then-reinsert), not a swap. Out-of-range
    /// indices fail with [`CoreError::Range`] and change nothing;
    /// `from == to` succeeds as a no-op.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), CoreError> {
        let len = self.pending.len();
        if from >= len {
            return Err(CoreError::Range { index: from, len });
        }
        if to >= len {
            return Err(CoreError::Range { index: to, len });
        }
        if from == to {
            return Ok(());
        }
        let item = self.pending.remove(from);
        self.pending.insert(to, item);
        Ok(())
    }

    /// Release every pending preview and empty the pending sequence.
    /// Idempotent: a second call finds nothing to release.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// [`clear`](Self::clear) plus discard the committed-reference mirror.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.committed.clear();
    }

    /// Replace the committed-reference mirror. The store never edits this
    /// sequence; it only counts it toward capacity.
    pub fn set_committed(&mut self, refs: Vec<String>) {
        self.committed = refs;
    }

    /// The mirrored committed references.
    pub fn committed(&self) -> &[String] {
        &self.committed
    }

    /// Number of pending images.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Read-only view over the pending items, in order.
    pub fn items(&self) -> impl Iterator<Item = &PendingImage> {
        self.pending.iter()
    }

    /// Raw bytes of one pending item, for the external uploader.
    pub fn raw(&self, id: &str) -> Option<&[u8]> {
        self.pending
            .iter()
            .find(|img| img.id == id)
            .map(|img| img.raw())
    }
}

impl std::fmt::Debug for PendingImageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingImageStore")
            .field("pending", &self.pending.len())
            .field("committed", &self.committed.len())
            .field("max_images", &self.max_images)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts allocations and releases so tests can assert the pairing.
    #[derive(Default)]
    struct CountingAllocator {
        allocated: AtomicUsize,
        released: AtomicUsize,
    }

    impl CountingAllocator {
        fn live(&self) -> usize {
            self.allocated.load(Ordering::SeqCst) - self.released.load(Ordering::SeqCst)
        }
    }

    impl PreviewAllocator for CountingAllocator {
        fn allocate(&self, _raw: &[u8]) -> String {
            let n = self.allocated.fetch_add(1, Ordering::SeqCst);
            format!("preview://{n}")
        }

        fn release(&self, _handle: &str) {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn store_with_counter(max: usize) -> (PendingImageStore, Arc<CountingAllocator>) {
        let counter = Arc::new(CountingAllocator::default());
        let store = PendingImageStore::new(Arc::clone(&counter) as _, max);
        (store, counter)
    }

    // -- Handle pairing --

    #[test]
    fn live_handles_track_pending_count() {
        let (mut store, counter) = store_with_counter(8);

        let a = store.add(vec![1], None).unwrap();
        let b = store.add(vec![2], None).unwrap();
        store.add(vec![3], None).unwrap();
        assert_eq!(counter.live(), 3);
        assert_eq!(store.len(), 3);

        store.remove(&a);
        assert_eq!(counter.live(), 2);

        store.remove(&b);
        store.add(vec![4], None).unwrap();
        assert_eq!(counter.live(), store.len());
    }

    #[test]
    fn remove_absent_id_is_noop() {
        let (mut store, counter) = store_with_counter(8);
        store.add(vec![1], Some("a".to_string())).unwrap();

        store.remove("missing");
        store.remove("a");
        store.remove("a"); // already gone

        assert_eq!(counter.released.load(Ordering::SeqCst), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn clear_twice_releases_nothing_twice() {
        let (mut store, counter) = store_with_counter(8);
        store.add(vec![1], None).unwrap();
        store.add(vec![2], None).unwrap();

        store.clear();
        assert_eq!(counter.released.load(Ordering::SeqCst), 2);

        store.clear();
        assert_eq!(counter.released.load(Ordering::SeqCst), 2);
        assert_eq!(counter.live(), 0);
    }

    #[test]
    fn dropping_the_store_releases_remaining_handles() {
        let (mut store, counter) = store_with_counter(8);
        store.add(vec![1], None).unwrap();
        store.add(vec![2], None).unwrap();

        drop(store);
        assert_eq!(counter.live(), 0);
    }

    #[test]
    fn reset_clears_pending_and_committed_mirror() {
        let (mut store, counter) = store_with_counter(8);
        store.set_committed(vec!["https://cdn/a.png".to_string()]);
        store.add(vec![1], None).unwrap();

        store.reset();

        assert!(store.is_empty());
        assert!(store.committed().is_empty());
        assert_eq!(counter.live(), 0);
    }

    // -- Capacity --

    #[test]
    fn add_beyond_max_is_rejected_without_mutation() {
        let (mut store, counter) = store_with_counter(2);
        store.add(vec![1], None).unwrap();
        store.add(vec![2], None).unwrap();

        let err = store.add(vec![3], None);
        assert_matches!(err, Err(CoreError::Capacity { max: 2 }));
        assert_eq!(store.len(), 2);
        // The rejected add allocated no handle.
        assert_eq!(counter.allocated.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn default_capacity_caps_at_eight() {
        let counter = Arc::new(CountingAllocator::default());
        let mut store = PendingImageStore::with_default_capacity(Arc::clone(&counter) as _);
        for i in 0..DEFAULT_MAX_IMAGES {
            store.add(vec![i as u8], None).unwrap();
        }
        assert_matches!(store.add(vec![9], None), Err(CoreError::Capacity { max: 8 }));
    }

    #[test]
    fn committed_mirror_counts_toward_capacity() {
        let (mut store, _) = store_with_counter(3);
        store.set_committed(vec![
            "https://cdn/a.png".to_string(),
            "https://cdn/b.png".to_string(),
        ]);

        store.add(vec![1], None).unwrap();
        assert_matches!(
            store.add(vec![2], None),
            Err(CoreError::Capacity { max: 3 })
        );
        assert_eq!(store.len(), 1);
    }

    // -- Ids --

    #[test]
    fn caller_supplied_id_is_kept() {
        let (mut store, _) = store_with_counter(8);
        let id = store.add(vec![1], Some("custom".to_string())).unwrap();
        assert_eq!(id, "custom");
        assert_eq!(store.raw("custom"), Some(&[1u8][..]));
    }

    #[test]
    fn generated_ids_are_unique() {
        let (mut store, _) = store_with_counter(8);
        let a = store.add(vec![1], None).unwrap();
        let b = store.add(vec![2], None).unwrap();
        assert_ne!(a, b);
    }

    // -- Reorder --

    #[test]
    fn reorder_moves_not_swaps() {
        let (mut store, _) = store_with_counter(8);
        for id in ["a", "b", "c", "d"] {
            store.add(vec![0], Some(id.to_string())).unwrap();
        }

        store.reorder(0, 2).unwrap();

        let order: Vec<_> = store.items().map(|img| img.id().to_string()).collect();
        assert_eq!(order, ["b", "c", "a", "d"]);
    }

    #[test]
    fn reorder_same_index_is_noop() {
        let (mut store, _) = store_with_counter(8);
        for id in ["a", "b"] {
            store.add(vec![0], Some(id.to_string())).unwrap();
        }

        store.reorder(1, 1).unwrap();

        let order: Vec<_> = store.items().map(|img| img.id().to_string()).collect();
        assert_eq!(order, ["a", "b"]);
    }

    #[test]
    fn reorder_out_of_range_fails_without_mutation() {
        let (mut store, _) = store_with_counter(8);
        store.add(vec![0], Some("a".to_string())).unwrap();

        assert_matches!(store.reorder(1, 0), Err(CoreError::Range { index: 1, len: 1 }));
        assert_matches!(store.reorder(0, 5), Err(CoreError::Range { index: 5, len: 1 }));
        assert_eq!(store.len(), 1);
    }

    // -- Raw bytes --

    #[test]
    fn raw_bytes_survive_unmodified() {
        let (mut store, _) = store_with_counter(8);
        let payload = vec![0xFF, 0xD8, 0xFF, 0xE0];
        store.add(payload.clone(), Some("jpeg".to_string())).unwrap();
        assert_eq!(store.raw("jpeg"), Some(payload.as_slice()));
    }
}
