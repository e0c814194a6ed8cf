//! Multicast cell replaying its full history to new subscribers.

use std::cell::RefCell;

use futures::{
    channel::mpsc,
    stream::{self, LocalBoxStream, StreamExt as _},
};

/// Multicast sender buffering every pushed value.
///
/// Each new subscriber first receives the whole history of values pushed so
/// far, in push order, and then every value pushed afterwards. The buffer is
/// unbounded and lives as long as the cell does.
#[derive(Debug, Default)]
pub struct ReplayCell<D>(RefCell<Inner<D>>);

/// History of a [`ReplayCell`] with its subscribers.
#[derive(Debug, Default)]
struct Inner<D> {
    /// All values pushed into the [`ReplayCell`] so far.
    history: Vec<D>,

    /// Senders of all active subscriptions, in subscription order.
    subs: Vec<mpsc::UnboundedSender<D>>,
}

impl<D> ReplayCell<D>
where
    D: Clone + 'static,
{
    /// Returns a new [`ReplayCell`] with an empty history.
    #[inline]
    pub fn new() -> Self {
        Self(RefCell::new(Inner {
            history: Vec::new(),
            subs: Vec::new(),
        }))
    }

    /// Appends the given value to the history and delivers it to all current
    /// subscribers, in subscription order.
    ///
    /// Never fails. Subscribers whose stream has been dropped are pruned.
    pub fn push(&self, data: D) {
        let mut inner = self.0.borrow_mut();
        inner.history.push(data.clone());
        inner.subs.retain(|sub| sub.unbounded_send(data.clone()).is_ok());
    }

    /// Returns a [`Stream`] replaying the whole history first, then yielding
    /// every subsequently pushed value.
    ///
    /// Dropping the stream unsubscribes. The stream ends when this
    /// [`ReplayCell`] is dropped (after the replayed history is consumed).
    ///
    /// [`Stream`]: futures::Stream
    pub fn subscribe(&self) -> LocalBoxStream<'static, D> {
        let mut inner = self.0.borrow_mut();
        let (tx, rx) = mpsc::unbounded();
        inner.subs.push(tx);

        stream::iter(inner.history.clone()).chain(rx).boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt as _;

    use super::ReplayCell;

    #[tokio::test]
    async fn full_history_is_replayed_to_late_subscribers() {
        let cell = ReplayCell::new();
        cell.push(1);
        cell.push(2);
        cell.push(3);

        let updates = cell.subscribe();
        drop(cell);

        assert_eq!(updates.collect::<Vec<_>>().await, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn live_values_follow_the_replayed_history() {
        let cell = ReplayCell::new();
        cell.push(1);

        let updates = cell.subscribe();
        cell.push(2);
        cell.push(3);
        drop(cell);

        assert_eq!(updates.collect::<Vec<_>>().await, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn empty_history_replays_nothing() {
        let cell = ReplayCell::new();
        let updates = cell.subscribe();
        cell.push(1);
        drop(cell);

        assert_eq!(updates.collect::<Vec<_>>().await, vec![1]);
    }
}
