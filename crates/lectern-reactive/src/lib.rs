//! Single-threaded multicast data containers.
//!
//! The containers of this crate hold values and hand them out as [`Stream`]s
//! of updates. They differ only in what a late subscriber sees:
//!
//! - [`BehaviorCell`] replays the latest value to every new subscriber, then
//!   keeps delivering all further updates;
//! - [`Publisher`] replays nothing, a subscriber sees only the values
//!   published after it attached;
//! - [`ReplayCell`] replays the whole history of pushed values.
//!
//! All of them are `!Send` and intended for one logical thread of control:
//! updates interleave through asynchronous completions, never in parallel.
//!
//! [`Stream`]: futures::Stream
//!
//!
//! # Holding the latest value
//!
//! ```
//! use futures::StreamExt as _;
//! use lectern_reactive::BehaviorCell;
//!
//! # futures::executor::block_on(async {
//! let cell = BehaviorCell::new(0u32);
//!
//! // A subscriber immediately receives the current value...
//! let mut updates = cell.subscribe();
//! assert_eq!(updates.next().await.unwrap(), 0);
//!
//! // ...and every value set afterwards.
//! cell.set(1);
//! assert_eq!(updates.next().await.unwrap(), 1);
//!
//! // The current value can also be read without subscribing.
//! assert_eq!(cell.get(), 1);
//! # });
//! ```
//!
//!
//! # Late subscription
//!
//! ```
//! use futures::StreamExt as _;
//! use lectern_reactive::BehaviorCell;
//!
//! # futures::executor::block_on(async {
//! let cell = BehaviorCell::new(0u32);
//! cell.set(1);
//! cell.set(2);
//!
//! // A subscriber attaching after the fact starts from the latest value,
//! // not from the initial one and not from some missed intermediate one.
//! let mut updates = cell.subscribe();
//! assert_eq!(updates.next().await.unwrap(), 2);
//! # });
//! ```
//!
//!
//! # Derived views
//!
//! ```
//! use futures::StreamExt as _;
//! use lectern_reactive::{derive_filtered, BehaviorCell};
//!
//! # futures::executor::block_on(async {
//! let cell = BehaviorCell::new(vec![1u32, 2, 3, 4]);
//!
//! // A derived view filters every delivered list, leaving the source's
//! // lists untouched.
//! let mut evens = derive_filtered(cell.subscribe(), |n| n % 2 == 0);
//! assert_eq!(evens.next().await.unwrap(), vec![2, 4]);
//!
//! cell.set(vec![5, 6]);
//! assert_eq!(evens.next().await.unwrap(), vec![6]);
//! assert_eq!(cell.get(), vec![5, 6]);
//! # });
//! ```

#![forbid(unsafe_code)]

mod behavior;
mod publish;
mod replay;
mod view;

pub use self::{
    behavior::BehaviorCell, publish::Publisher, replay::ReplayCell,
    view::derive_filtered,
};
