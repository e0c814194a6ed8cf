//! Derived read-only views over list-valued streams.

use futures::stream::{LocalBoxStream, StreamExt as _};

/// Derives a filtered view from a list-valued stream.
///
/// For every list the source yields (including the one replayed on
/// subscription), a fresh list of the elements matching `pred` is built and
/// yielded, preserving the source's element order. The source's own lists
/// are never mutated, and the operator keeps no state of its own: deriving
/// twice with the same predicate yields the same results.
pub fn derive_filtered<T, F>(
    source: LocalBoxStream<'static, Vec<T>>,
    pred: F,
) -> LocalBoxStream<'static, Vec<T>>
where
    T: Clone + 'static,
    F: Fn(&T) -> bool + 'static,
{
    source
        .map(move |items| {
            items.iter().filter(|item| pred(item)).cloned().collect()
        })
        .boxed_local()
}
