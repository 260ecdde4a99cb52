//! Degree type and degree-table sizing for Fibonacci heap nodes.
//!
//! # Why u8?
//!
//! A node's degree is the number of its children. In a Fibonacci heap a node
//! of degree `d` roots a subtree of at least `Fib(d + 2)` nodes, so the degree
//! is bounded by `log_φ(n)`:
//!
//! - 2³² nodes → max degree 46
//! - 2⁶⁴ nodes → max degree 92
//!
//! `u8` therefore covers every heap that fits in memory while saving 7 bytes
//! per node over `usize`.
//!
//! # Degree Table
//!
//! Consolidation buckets roots by degree. [`table_capacity`] gives the
//! starting size of that table. The table must still grow on demand: a node's
//! degree is recorded when it gains children, while the heap's length may
//! have shrunk since, so a live degree can exceed the bound computed from the
//! current length.

/// Type alias for node degree.
pub type Degree = u8;

/// Maximum representable degree.
pub const MAX_DEGREE: Degree = u8::MAX;

/// The golden ratio φ.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Increment a degree, panicking on overflow.
///
/// # Panics
///
/// Panics if `degree == MAX_DEGREE`. That would need a subtree of more than
/// `Fib(257)` nodes, so it indicates a bug in the heap.
///
/// # Example
///
/// ```rust
/// use arena_fibheap::degree::{checked_increment, Degree};
///
/// let degree: Degree = 5;
/// assert_eq!(checked_increment(degree), 6);
/// ```
#[inline]
pub fn checked_increment(degree: Degree) -> Degree {
    degree.checked_add(1).expect(
        "degree overflow: a node of degree d roots at least Fib(d + 2) nodes, \
         so u8::MAX is unreachable in a well-formed heap",
    )
}

/// Decrement a degree, returning 0 if already at minimum.
///
/// ```rust
/// use arena_fibheap::degree::saturating_decrement;
///
/// assert_eq!(saturating_decrement(3), 2);
/// assert_eq!(saturating_decrement(0), 0);
/// ```
#[inline]
pub fn saturating_decrement(degree: Degree) -> Degree {
    degree.saturating_sub(1)
}

/// Initial number of degree slots for consolidating a heap of `len` nodes:
/// `⌊log_φ(len)⌋ + 2`.
///
/// ```rust
/// use arena_fibheap::degree::table_capacity;
///
/// assert_eq!(table_capacity(0), 2);
/// assert_eq!(table_capacity(1), 2);
/// assert_eq!(table_capacity(100), 11);
/// ```
#[inline]
pub fn table_capacity(len: usize) -> usize {
    if len <= 1 {
        return 2;
    }
    ((len as f64).ln() / PHI.ln()).floor() as usize + 2
}

/// Smallest subtree size a node of the given degree may root: `Fib(degree + 2)`.
///
/// Saturates at `usize::MAX` for degrees whose bound does not fit.
pub fn min_subtree_size(degree: Degree) -> usize {
    // Fib(1) = Fib(2) = 1
    let (mut a, mut b) = (1usize, 1usize);
    for _ in 0..degree {
        let next = a.saturating_add(b);
        a = b;
        b = next;
    }
    b
}
