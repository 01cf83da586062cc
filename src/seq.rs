//! Slice iteration and transformation helpers.
//!
//! The callbacks here receive the element, its index, and (for the iterative
//! forms) the whole original slice, so a callback can inspect sibling
//! elements. Indexability and element ordering come from the slice type
//! itself, so the "non-indexable input" failure mode of looser renditions of
//! these helpers is absorbed by the type system.

/// Calls `f(&seq[i], i, seq)` for every index in ascending order.
///
/// Visits each index exactly once. The third argument is the original slice
/// on every call. Return values of `f` are discarded; this helper exists
/// purely for side effects.
pub fn for_each<T, R, F>(mut f: F, seq: &[T])
where
    F: FnMut(&T, usize, &[T]) -> R,
{
    for (index, item) in seq.iter().enumerate() {
        let _ = f(item, index, seq);
    }
}

/// Builds a fresh vector where `out[i] = f(&seq[i], i, seq)`.
///
/// Elements are produced in ascending index order; the output length equals
/// the input length and the input is not mutated.
pub fn map<T, U, F>(mut f: F, seq: &[T]) -> Vec<U>
where
    F: FnMut(&T, usize, &[T]) -> U,
{
    let mut out = Vec::with_capacity(seq.len());
    for (index, item) in seq.iter().enumerate() {
        out.push(f(item, index, seq));
    }
    out
}

/// Recursive form of [`map`].
///
/// Structurally: an empty slice maps to an empty vector; otherwise the head
/// maps through `f(head, index)` and is followed by the recursion on the
/// tail with `index + 1`. Output values and ordering match [`map`] exactly
/// for every finite slice.
///
/// The callback signature is narrower than the iterative form's: it receives
/// only the element and its index, with no slice back-reference. That
/// asymmetry is a preserved discrepancy, kept deliberately rather than
/// unified.
pub fn map_recursive<T, U, F>(mut f: F, seq: &[T]) -> Vec<U>
where
    F: FnMut(&T, usize) -> U,
{
    fn go<T, U, F>(f: &mut F, seq: &[T], index: usize) -> Vec<U>
    where
        F: FnMut(&T, usize) -> U,
    {
        match seq.split_first() {
            None => Vec::new(),
            Some((head, tail)) => {
                let mut out = vec![f(head, index)];
                out.extend(go(f, tail, index + 1));
                out
            }
        }
    }
    go(&mut f, seq, 0)
}
