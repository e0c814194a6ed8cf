//! Plain multicast without replay.

use std::cell::RefCell;

use futures::{
    channel::mpsc,
    stream::{LocalBoxStream, StreamExt as _},
};

/// Multicast sender without a current value.
///
/// Subscribers receive only the values published after they attached:
/// nothing is replayed to late subscribers. Use [`BehaviorCell`] when a
/// consumer attaching late must still see the latest state.
///
/// [`BehaviorCell`]: crate::BehaviorCell
#[derive(Debug, Default)]
pub struct Publisher<D>(RefCell<Vec<mpsc::UnboundedSender<D>>>);

impl<D> Publisher<D>
where
    D: Clone + 'static,
{
    /// Returns a new [`Publisher`] with no subscribers.
    #[inline]
    pub fn new() -> Self {
        Self(RefCell::new(Vec::new()))
    }

    /// Delivers the given value to all current subscribers, in subscription
    /// order.
    ///
    /// Never fails. Subscribers whose stream has been dropped are pruned.
    pub fn publish(&self, data: D) {
        self.0
            .borrow_mut()
            .retain(|sub| sub.unbounded_send(data.clone()).is_ok());
    }

    /// Returns a [`Stream`] of all values published after this call.
    ///
    /// Dropping the stream unsubscribes. The stream ends when this
    /// [`Publisher`] is dropped.
    ///
    /// [`Stream`]: futures::Stream
    pub fn subscribe(&self) -> LocalBoxStream<'static, D> {
        let (tx, rx) = mpsc::unbounded();
        self.0.borrow_mut().push(tx);
        rx.boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt as _;

    use super::Publisher;

    #[tokio::test]
    async fn nothing_is_replayed_to_late_subscribers() {
        let publisher = Publisher::new();
        publisher.publish(1);
        publisher.publish(2);

        let updates = publisher.subscribe();
        publisher.publish(3);
        drop(publisher);

        assert_eq!(updates.collect::<Vec<_>>().await, vec![3]);
    }

    #[tokio::test]
    async fn all_subscribers_receive_published_values() {
        let publisher = Publisher::new();
        let first = publisher.subscribe();
        let second = publisher.subscribe();

        publisher.publish(1);
        publisher.publish(2);
        drop(publisher);

        assert_eq!(first.collect::<Vec<_>>().await, vec![1, 2]);
        assert_eq!(second.collect::<Vec<_>>().await, vec![1, 2]);
    }

    #[tokio::test]
    async fn dropped_subscriber_is_pruned() {
        let publisher = Publisher::new();
        drop(publisher.subscribe());

        publisher.publish(1);
        assert!(publisher.0.borrow().is_empty());
    }
}
