//! Arena-backed Fibonacci heap
//!
//! This crate provides a mergeable min-priority queue implemented as a
//! Fibonacci heap, with nodes kept in a slot arena instead of behind raw
//! pointers.
//!
//! # Features
//!
//! - O(1) amortized insert and decrease_key
//! - O(log n) amortized extract_min and delete
//! - O(1) merge of two heaps; handles from both inputs stay valid
//! - Generational handles: a handle to a removed element is rejected with
//!   [`HeapError::InvalidHandle`] instead of being undefined behavior
//! - No `unsafe` code
//!
//! # Example
//!
//! ```rust
//! use arena_fibheap::{FibonacciHeap, HeapError};
//!
//! let mut heap = FibonacciHeap::new();
//! heap.insert(5);
//! heap.insert(3);
//! let eight = heap.insert(8);
//! heap.insert(1);
//!
//! assert_eq!(heap.extract_min(), Ok(1));
//! heap.decrease_key(&eight, 0).unwrap();
//! assert_eq!(heap.find_min(), Ok(&0));
//! assert_eq!(heap.decrease_key(&eight, 9), Err(HeapError::InvalidArgument));
//! ```

#![forbid(unsafe_code)]

pub mod arena;
pub mod degree;
pub mod fibonacci;
pub mod traits;

// Re-export the main types for convenience
pub use fibonacci::{FibonacciHandle, FibonacciHeap};
pub use traits::{DecreaseKeyHeap, Heap, HeapError};
