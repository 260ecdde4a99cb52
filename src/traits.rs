//! Common traits for heap data structures
//!
//! This module provides a two-tier trait hierarchy for priority queues whose
//! elements are their own priorities:
//!
//! - [`Heap`]: Base trait with `push`/`peek`/`pop`/`merge`
//! - [`DecreaseKeyHeap`]: Extended trait adding handle-based `decrease_key` and `delete`
//!
//! The base [`Heap`] trait mirrors the shape of `std::collections::BinaryHeap`
//! (as a min-heap), while [`DecreaseKeyHeap`] adds the operations that need a
//! stable reference to an element already in the heap.

use thiserror::Error;

/// Error type for heap operations
///
/// None of these errors leave the heap modified: after any `Err` the heap is
/// exactly as it was before the call.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The heap holds no elements
    #[error("heap is empty")]
    EmptyHeap,
    /// The new key is greater than the element's current key
    #[error("new key is greater than current key")]
    InvalidArgument,
    /// The handle does not name a live element of this heap
    #[error("handle is no longer valid (element was removed or belongs to another heap)")]
    InvalidHandle,
}

/// A handle to an element in the heap, used for `decrease_key` and `delete`
///
/// This is an opaque type that identifies a specific element in the heap.
pub trait Handle: Clone + PartialEq + Eq {}

/// Base trait for heap/priority queue data structures
///
/// # Example
///
/// ```rust
/// use arena_fibheap::{FibonacciHeap, Heap};
///
/// let mut heap: FibonacciHeap<i32> = Heap::new();
/// heap.push(3);
/// heap.push(1);
/// heap.push(2);
///
/// assert_eq!(heap.peek(), Some(&1));
/// assert_eq!(heap.pop(), Some(1));
/// ```
pub trait Heap<K: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts a key
    fn push(&mut self, key: K);

    /// Returns the minimum key without removing it
    ///
    /// # Time Complexity
    /// O(1)
    fn peek(&self) -> Option<&K>;

    /// Removes and returns the minimum key
    fn pop(&mut self) -> Option<K>;

    /// Merges another heap into this one, consuming the other heap
    fn merge(&mut self, other: Self);
}

/// Extended heap trait with `decrease_key` and `delete` support
///
/// # Example
///
/// ```rust
/// use arena_fibheap::{DecreaseKeyHeap, FibonacciHeap, Heap};
///
/// let mut heap: FibonacciHeap<i32> = Heap::new();
/// let handle = heap.push_with_handle(10);
/// heap.decrease_key(&handle, 5).unwrap();
/// assert_eq!(heap.peek(), Some(&5));
/// ```
pub trait DecreaseKeyHeap<K: Ord>: Heap<K> {
    /// The handle type for this heap, used to reference elements
    type Handle: Handle;

    /// Inserts a key, returning a handle to it
    fn push_with_handle(&mut self, key: K) -> Self::Handle;

    /// Lowers the key of the element identified by the handle
    ///
    /// # Errors
    /// - [`HeapError::InvalidArgument`] if `new_key` is greater than the current key
    /// - [`HeapError::InvalidHandle`] if the handle no longer names a live element
    fn decrease_key(&mut self, handle: &Self::Handle, new_key: K) -> Result<(), HeapError>;

    /// Removes the element identified by the handle, returning its key
    ///
    /// # Errors
    /// [`HeapError::InvalidHandle`] if the handle no longer names a live element
    fn delete(&mut self, handle: &Self::Handle) -> Result<K, HeapError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(HeapError::EmptyHeap.to_string(), "heap is empty");
        assert_eq!(
            HeapError::InvalidArgument.to_string(),
            "new key is greater than current key"
        );
        assert!(HeapError::InvalidHandle.to_string().starts_with("handle is no longer valid"));
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
        assert_error(&HeapError::EmptyHeap);
    }
}
