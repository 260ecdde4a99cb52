//! Stress tests that push the heap through long operation sequences
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases and verify correctness under load.

use arena_fibheap::{FibonacciHeap, HeapError};

/// Drains a heap and asserts the keys come out non-decreasing
fn drain_sorted(heap: &mut FibonacciHeap<i64>) -> Vec<i64> {
    let mut out = Vec::with_capacity(heap.len());
    while let Ok(key) = heap.extract_min() {
        if let Some(&last) = out.last() {
            assert!(key >= last, "extracted {} after {}", key, last);
        }
        out.push(key);
    }
    out
}

#[test]
fn test_massive_operations() {
    let mut heap = FibonacciHeap::new();
    for i in 0..10_000 {
        heap.insert(i);
    }
    assert_eq!(heap.len(), 10_000);

    for i in 0..10_000 {
        assert_eq!(heap.extract_min(), Ok(i));
    }
    assert!(heap.is_empty());
}

#[test]
fn test_reverse_insert_order() {
    let mut heap: FibonacciHeap<i64> = (0..2_000).rev().collect();
    let drained = drain_sorted(&mut heap);
    assert_eq!(drained, (0..2_000i64).collect::<Vec<_>>());
}

#[test]
fn test_many_decrease_keys() {
    let mut heap = FibonacciHeap::new();
    let handles: Vec<_> = (0..500).map(|i| heap.insert(10_000 + i)).collect();
    heap.insert(-1);
    assert_eq!(heap.extract_min(), Ok(-1));

    for (i, handle) in handles.iter().enumerate() {
        assert!(heap.decrease_key(handle, i as i64).is_ok());
        assert!(heap.verify_internal_structure());
    }

    for i in 0..500 {
        assert_eq!(heap.extract_min(), Ok(i));
    }
}

#[test]
fn test_alternating_ops() {
    let mut heap = FibonacciHeap::new();
    for i in 0..2_000 {
        heap.insert(i * 2);
        heap.insert(i * 2 + 1);
        assert!(heap.extract_min().is_ok());
    }
    assert_eq!(heap.len(), 2_000);
    assert!(heap.verify_internal_structure());
    drain_sorted(&mut heap);
}

#[test]
fn test_large_merge() {
    let mut heap1 = FibonacciHeap::new();
    let mut heap2 = FibonacciHeap::new();
    for i in 0..500 {
        heap1.insert(i * 2);
        heap2.insert(i * 2 + 1);
    }
    heap1.extract_min().unwrap();
    heap2.extract_min().unwrap();

    heap1.merge(heap2);
    assert_eq!(heap1.len(), 998);
    assert!(heap1.verify_internal_structure());

    let drained = drain_sorted(&mut heap1);
    assert_eq!(drained.len(), 998);
    assert_eq!(drained[0], 2);
}

#[test]
fn test_large_merge_keeps_handles_from_both_sides() {
    let mut left = FibonacciHeap::new();
    let mut right = FibonacciHeap::new();
    let left_handles: Vec<_> = (0..50_000).map(|i| left.insert(i * 2 + 100_000)).collect();
    let right_handles: Vec<_> = (0..50_000).map(|i| right.insert(i * 2 + 100_001)).collect();
    // Give both sides real trees before merging
    left.extract_min().unwrap();
    right.extract_min().unwrap();

    left.merge(right);
    assert_eq!(left.len(), 99_998);

    for (i, handle) in left_handles.iter().enumerate().skip(1).step_by(1_000) {
        assert_eq!(left.get(handle), Some(&(i as i64 * 2 + 100_000)));
        assert_eq!(left.decrease_key(handle, -(i as i64)), Ok(()));
    }
    for (i, handle) in right_handles.iter().enumerate().skip(1).step_by(1_000) {
        assert_eq!(left.decrease_key(handle, -(i as i64) - 1), Ok(()));
    }
    assert_eq!(left.delete(&right_handles[7]), Ok(100_015));
    assert_eq!(left.decrease_key(&left_handles[0], 0), Err(HeapError::InvalidHandle));
    assert!(left.verify_internal_structure());

    assert_eq!(left.extract_min(), Ok(-49_002));
    assert_eq!(left.extract_min(), Ok(-49_001));
    assert_eq!(drain_sorted(&mut left).len(), 99_995);
}

#[test]
fn test_chain_of_merges() {
    let mut total = FibonacciHeap::new();
    let mut expected = Vec::new();
    for chunk in 0..50 {
        let mut part = FibonacciHeap::new();
        for i in 0..chunk {
            let key = (chunk * 97 + i * 31) % 1_000;
            part.insert(key);
            expected.push(key);
        }
        total = FibonacciHeap::union(total, part);
        assert_eq!(total.len(), expected.len());
    }
    expected.sort_unstable();
    assert_eq!(drain_sorted(&mut total), expected);
}

#[test]
fn test_decrease_after_partial_drain() {
    let mut heap = FibonacciHeap::new();
    let handles: Vec<_> = (0..300).map(|i| heap.insert(i * 10)).collect();

    for _ in 0..100 {
        heap.extract_min().unwrap();
    }

    for (i, handle) in handles.iter().enumerate() {
        let current = *heap.find_min().unwrap();
        let result = heap.decrease_key(handle, current - 1);
        if i < 100 {
            assert_eq!(result, Err(HeapError::InvalidHandle));
        } else {
            assert_eq!(result, Ok(()));
        }
    }
    assert_eq!(heap.len(), 200);
    assert!(heap.verify_internal_structure());
}

/// Repeatedly builds deep trees, cuts leaves out of them and drains most of
/// the heap, checking the structure after every round
#[test]
fn test_cut_and_drain_rounds() {
    let mut heap = FibonacciHeap::new();
    let mut handles: Vec<_> = (0..4_096).map(|i| heap.insert(i)).collect();
    heap.extract_min().unwrap();

    let mut next_low = -1;
    for round in 0..12 {
        // Pull leaves out from under their parents, leaving high-degree roots
        for handle in handles.iter().skip(round * 7 + 1).step_by(3) {
            if heap.contains(handle) {
                heap.decrease_key(handle, next_low).unwrap();
                next_low -= 1;
            }
        }
        // Drain almost everything small so the length shrinks
        let keep = heap.len() / 4;
        while heap.len() > keep {
            heap.extract_min().unwrap();
        }
        assert!(heap.verify_internal_structure());
        handles.retain(|h| heap.contains(h));
        if heap.is_empty() {
            break;
        }
    }
    drain_sorted(&mut heap);
}

#[test]
fn test_delete_everything_in_insert_order() {
    let mut heap = FibonacciHeap::new();
    let handles: Vec<_> = (0..1_000).map(|i| heap.insert((i * 7_919) % 1_000)).collect();
    heap.insert(-1);
    heap.extract_min().unwrap();

    for (i, handle) in handles.iter().enumerate() {
        assert_eq!(heap.delete(handle), Ok(((i * 7_919) % 1_000) as i64));
        if i % 50 == 0 {
            assert!(heap.verify_internal_structure());
        }
    }
    assert!(heap.is_empty());
}

#[test]
fn test_large_keys() {
    let mut heap = FibonacciHeap::new();
    heap.insert(i64::MAX);
    heap.insert(i64::MIN);
    heap.insert(0);

    assert_eq!(heap.extract_min(), Ok(i64::MIN));
    assert_eq!(heap.extract_min(), Ok(0));
    assert_eq!(heap.extract_min(), Ok(i64::MAX));
}

#[test]
fn test_delete_min_key_needs_no_sentinel() {
    let mut heap = FibonacciHeap::new();
    let h = heap.insert(i64::MIN);
    heap.insert(i64::MIN);
    heap.insert(5);

    assert_eq!(heap.delete(&h), Ok(i64::MIN));
    assert_eq!(heap.into_sorted_vec(), vec![i64::MIN, 5]);
}
