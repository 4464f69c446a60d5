//! Binary searches over ascending slices.
//!
//! `find` is the single underlying search; the four boundary searches are
//! derived from its result with insertion-point arithmetic. A negative result
//! of `find` encodes the insertion point `ip` as `-ip - 1`, so `-1` means
//! "insert at 0".

/// Position of an element equal to `x`, or `-(insertion_point) - 1` when absent.
///
/// When `x` occurs several times the position of the first occurrence is returned.
/// The insertion point is the number of elements strictly smaller than `x`.
#[inline]
pub fn find<K: Ord>(keys: &[K], x: &K) -> isize {
    let ip = keys.partition_point(|k| k < x);
    if ip < keys.len() && keys[ip] == *x {
        ip as isize
    } else {
        -(ip as isize) - 1
    }
}

/// First position with a key `>= x`, or `keys.len()` when there is none.
#[inline]
pub fn find_ge<K: Ord>(keys: &[K], x: &K) -> isize {
    let index = find(keys, x);
    if index < 0 { -index - 1 } else { index }
}

/// First position with a key `> x`, or `keys.len()` when there is none.
pub fn find_gt<K: Ord>(keys: &[K], x: &K) -> isize {
    let index = find(keys, x);
    if index < 0 {
        return -index - 1;
    }
    let mut index = index as usize;
    while index < keys.len() && keys[index] == *x {
        index += 1;
    }
    index as isize
}

/// Last position with a key `<= x`, or `-1` when there is none.
pub fn find_le<K: Ord>(keys: &[K], x: &K) -> isize {
    let index = find(keys, x);
    if index < 0 {
        return -index - 2;
    }
    let mut index = index as usize;
    while index + 1 < keys.len() && keys[index + 1] == *x {
        index += 1;
    }
    index as isize
}

/// Last position with a key `< x`, or `-1` when there is none.
pub fn find_lt<K: Ord>(keys: &[K], x: &K) -> isize {
    let mut index = find(keys, x);
    if index < 0 {
        return -index - 2;
    }
    while index >= 0 && keys[index as usize] == *x {
        index -= 1;
    }
    index
}
