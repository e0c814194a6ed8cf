//! Multicast cell replaying its latest value to new subscribers.

use std::cell::{Ref, RefCell};

use futures::{
    channel::mpsc,
    stream::{self, LocalBoxStream, StreamExt as _},
};

/// Multicast value holder.
///
/// Holds exactly one current value. [`BehaviorCell::set`] replaces it and
/// synchronously hands the new value to every live subscriber, in
/// subscription order. A stream obtained with [`BehaviorCell::subscribe`]
/// first yields whatever the current value is at subscription time, even if
/// [`BehaviorCell::set`] has never been called.
///
/// Every `set` is delivered: values are not compared with the previous one,
/// so pushing an equal value notifies subscribers again.
///
/// Dropping a subscription stream unsubscribes it; the dangling sending side
/// is pruned on the next `set`.
#[derive(Debug)]
pub struct BehaviorCell<D>(RefCell<Inner<D>>);

/// Current value of a [`BehaviorCell`] with its subscribers.
#[derive(Debug)]
struct Inner<D> {
    /// Value held by the [`BehaviorCell`] at the moment.
    data: D,

    /// Senders of all active subscriptions, in subscription order.
    subs: Vec<mpsc::UnboundedSender<D>>,
}

impl<D> BehaviorCell<D>
where
    D: Clone + 'static,
{
    /// Returns a new [`BehaviorCell`] with the given current value.
    #[inline]
    pub fn new(data: D) -> Self {
        Self(RefCell::new(Inner {
            data,
            subs: Vec::new(),
        }))
    }

    /// Returns a copy of the current value without subscribing.
    #[inline]
    pub fn get(&self) -> D {
        self.0.borrow().data.clone()
    }

    /// Returns an immutable reference to the current value.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, D> {
        Ref::map(self.0.borrow(), |inner| &inner.data)
    }

    /// Replaces the current value and delivers it to all subscribers.
    ///
    /// Never fails. Subscribers whose stream has been dropped are pruned.
    pub fn set(&self, data: D) {
        let mut inner = self.0.borrow_mut();
        inner.data = data.clone();
        inner.subs.retain(|sub| sub.unbounded_send(data.clone()).is_ok());
    }

    /// Mutates the current value in place, then delivers the result to all
    /// subscribers once.
    pub fn mutate<F>(&self, f: F)
    where
        F: FnOnce(&mut D),
    {
        let mut inner = self.0.borrow_mut();
        f(&mut inner.data);
        let data = inner.data.clone();
        inner.subs.retain(|sub| sub.unbounded_send(data.clone()).is_ok());
    }

    /// Returns a [`Stream`] yielding the current value immediately, then
    /// every value passed to [`BehaviorCell::set`] afterwards.
    ///
    /// The stream is the unsubscribe handle: dropping it detaches the
    /// subscriber. The stream ends when this [`BehaviorCell`] is dropped.
    ///
    /// [`Stream`]: futures::Stream
    pub fn subscribe(&self) -> LocalBoxStream<'static, D> {
        let mut inner = self.0.borrow_mut();
        let (tx, rx) = mpsc::unbounded();
        inner.subs.push(tx);

        let current = inner.data.clone();
        stream::once(async move { current }).chain(rx).boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::{FutureExt as _, StreamExt as _};
    use tokio::time::timeout;

    use super::BehaviorCell;

    #[tokio::test]
    async fn subscriber_receives_current_value() {
        let cell = BehaviorCell::new(9);
        let current = cell.subscribe().next().await.unwrap();
        assert_eq!(current, 9);
    }

    #[tokio::test]
    async fn late_subscriber_receives_latest_value_only() {
        let cell = BehaviorCell::new(0);
        cell.set(1);
        cell.set(2);
        cell.set(3);

        let mut updates = cell.subscribe();
        assert_eq!(updates.next().await.unwrap(), 3);

        cell.set(4);
        assert_eq!(updates.next().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn all_subscribers_receive_updates_in_order() {
        let cell = BehaviorCell::new(0);
        let first = cell.subscribe();
        let second = cell.subscribe();

        cell.set(1);
        cell.set(2);
        cell.set(3);
        drop(cell);

        assert_eq!(first.collect::<Vec<_>>().await, vec![0, 1, 2, 3]);
        assert_eq!(second.collect::<Vec<_>>().await, vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn equal_values_are_delivered_again() {
        let cell = BehaviorCell::new(1);
        let updates = cell.subscribe();

        cell.set(1);
        cell.set(1);
        drop(cell);

        assert_eq!(updates.collect::<Vec<_>>().await, vec![1, 1, 1]);
    }

    #[tokio::test]
    async fn delivery_is_synchronous_with_set() {
        let cell = BehaviorCell::new(0);
        let mut updates = cell.subscribe();
        assert_eq!(updates.next().now_or_never().unwrap().unwrap(), 0);

        cell.set(1);
        assert_eq!(updates.next().now_or_never().unwrap().unwrap(), 1);
    }

    #[tokio::test]
    async fn dropped_subscriber_does_not_affect_others() {
        let cell = BehaviorCell::new(0);
        let dropped = cell.subscribe();
        let mut alive = cell.subscribe();
        drop(dropped);

        cell.set(1);
        assert_eq!(alive.next().await.unwrap(), 0);
        assert_eq!(alive.next().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn get_does_not_subscribe() {
        let cell = BehaviorCell::new(0);
        cell.set(5);
        assert_eq!(cell.get(), 5);
        assert_eq!(*cell.borrow(), 5);
    }

    #[tokio::test]
    async fn mutate_notifies_once() {
        let cell = BehaviorCell::new(vec![1, 2]);
        let mut updates = cell.subscribe().skip(1);

        cell.mutate(|data| data.push(3));

        assert_eq!(updates.next().await.unwrap(), vec![1, 2, 3]);
        let _ = timeout(Duration::from_millis(50), updates.next())
            .await
            .unwrap_err();
    }

    #[tokio::test]
    async fn stream_ends_when_cell_is_dropped() {
        let cell = BehaviorCell::new(0);
        let updates = cell.subscribe();
        drop(cell);
        assert!(updates.skip(1).next().await.is_none());
    }
}
