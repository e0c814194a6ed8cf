//! Client-side reactive store for a course catalog backend.
//!
//! The centerpiece is [`Store`]: a single in-memory list of [`Course`]s held
//! behind a [`BehaviorCell`], so that every consumer subscribing late (a view
//! re-attaching after navigation, for example) still receives the latest
//! known list immediately, without another network round trip.
//!
//! The store is populated with one explicit [`Store::init`] call, serves
//! derived filtered views of the list, and applies edits optimistically:
//! [`Store::save_course`] publishes the updated list to all subscribers
//! synchronously and only then dispatches the remote write as a detached
//! task.
//!
//! One [`Store`] instance is meant to live for the whole application session
//! and be shared by reference ([`std::rc::Rc`]); it is `!Send` and assumes a
//! single logical thread of control.
//!
//! [`BehaviorCell`]: lectern_reactive::BehaviorCell

#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod conf;
pub mod model;
pub mod store;

pub use self::{
    api::{ApiError, CatalogApi, HttpCatalogApi},
    conf::Conf,
    model::{Course, CourseChanges, CourseId, Lesson, LessonId},
    store::{PendingWrite, Store, StoreError},
};
