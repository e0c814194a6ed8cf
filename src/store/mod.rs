//! Centralized in-memory store of the course catalog.

use std::{
    future::Future,
    pin::Pin,
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use derive_more::{Display, From};
use futures::stream::{LocalBoxStream, StreamExt as _};
use lectern_reactive::{derive_filtered, BehaviorCell};
use tokio::task::JoinHandle;

use crate::{
    api::{ApiError, CatalogApi},
    model::{Course, CourseChanges, CourseId, Lesson},
};

/// Errors of [`Store`] operations.
#[derive(Debug, Display, From)]
pub enum StoreError {
    /// No course with the given ID exists in the current list.
    ///
    /// Nothing is published and no network write is issued in this case.
    #[display(fmt = "unknown course: {}", _0)]
    #[from(ignore)]
    UnknownCourse(CourseId),

    /// Interaction with the catalog backend failed.
    #[display(fmt = "catalog API error: {}", _0)]
    Api(ApiError),

    /// Detached write task was cancelled or panicked before completing, so
    /// the outcome of the remote write is unknown.
    #[display(fmt = "remote write was lost")]
    WriteLost,
}

impl std::error::Error for StoreError {}

/// Handle to the detached network write issued by [`Store::save_course`].
///
/// The write is dispatched already: awaiting this handle only reports its
/// eventual outcome, and dropping it detaches the write entirely. Either
/// way, the in-memory update it belongs to stays applied.
#[derive(Debug)]
pub struct PendingWrite(JoinHandle<Result<(), ApiError>>);

impl Future for PendingWrite {
    type Output = Result<(), StoreError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.0).poll(cx).map(|res| match res {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(StoreError::Api(e)),
            Err(_) => Err(StoreError::WriteLost),
        })
    }
}

/// Centralized store of the course list.
///
/// One instance lives for the whole application session and is shared by
/// reference between all consumers ([`Rc<Store>`]), wired in explicitly
/// rather than looked up ambiently. The list itself sits behind a
/// [`BehaviorCell`], so late subscribers receive the latest known list
/// immediately instead of re-requesting it from the network.
///
/// The list is replaced wholesale on every change, never mutated in place,
/// and only [`Store::init`] and [`Store::save_course`] replace it. Courses
/// are held behind [`Rc`], so positions untouched by an update stay
/// reference-identical across list replacements and consumers can detect
/// "no change" by pointer comparison.
#[derive(Debug)]
pub struct Store<A> {
    /// Client of the catalog backend.
    ///
    /// Behind [`Arc`], since detached write tasks outlive a borrow of this
    /// [`Store`].
    api: Arc<A>,

    /// Current course list with its subscribers.
    courses: BehaviorCell<Vec<Rc<Course>>>,
}

impl<A> Store<A>
where
    A: CatalogApi + Send + Sync + 'static,
{
    /// Creates a new empty [`Store`] on top of the given backend client.
    pub fn new(api: A) -> Self {
        Self {
            api: Arc::new(api),
            courses: BehaviorCell::new(Vec::new()),
        }
    }

    /// Performs one network read of the complete course collection and
    /// publishes the received list to all subscribers.
    ///
    /// May be called repeatedly: every call re-executes the network read and
    /// fully replaces the list.
    ///
    /// # Errors
    ///
    /// Propagates the [`ApiError`] of a failed read. Nothing is published in
    /// that case: the current list stays exactly as it was.
    pub async fn init(&self) -> Result<(), StoreError> {
        let courses = self.api.fetch_courses().await?;
        log::debug!("course list loaded: {} courses", courses.len());

        self.courses.set(courses.into_iter().map(Rc::new).collect());
        Ok(())
    }

    /// Returns a stream of the course list: the latest known list
    /// immediately, then every subsequent replacement.
    ///
    /// Dropping the stream unsubscribes. The stream never completes on its
    /// own: it is expected to live as long as its consumer does.
    pub fn courses(&self) -> LocalBoxStream<'static, Vec<Rc<Course>>> {
        self.courses.subscribe()
    }

    /// Returns the current course list without subscribing.
    pub fn current(&self) -> Vec<Rc<Course>> {
        self.courses.get()
    }

    /// Returns a derived view of the courses with the given category label.
    ///
    /// The view is a stateless projection: it never mutates the source list
    /// and yields a freshly built list on every delivery.
    pub fn courses_by_category(
        &self,
        category: &str,
    ) -> LocalBoxStream<'static, Vec<Rc<Course>>> {
        let category = category.to_owned();
        derive_filtered(self.courses(), move |course: &Rc<Course>| {
            course.category == category
        })
    }

    /// Returns a derived view of the `BEGINNER` courses.
    pub fn beginner_courses(&self) -> LocalBoxStream<'static, Vec<Rc<Course>>> {
        self.courses_by_category("BEGINNER")
    }

    /// Returns a derived view of the `ADVANCED` courses.
    pub fn advanced_courses(&self) -> LocalBoxStream<'static, Vec<Rc<Course>>> {
        self.courses_by_category("ADVANCED")
    }

    /// Returns a derived view of the single course with the given ID.
    ///
    /// Yields nothing until a list containing the course is published, so a
    /// consumer interested in the present state only can just await the
    /// first item.
    pub fn course_by_id(
        &self,
        id: CourseId,
    ) -> LocalBoxStream<'static, Rc<Course>> {
        self.courses()
            .filter_map(move |courses| {
                let found = courses.iter().find(|c| c.id == id).cloned();
                async move { found }
            })
            .boxed_local()
    }

    /// Fetches the lessons of the given course matching the given free-text
    /// `filter`.
    ///
    /// Goes to the network every time: lessons are not cached by this
    /// [`Store`].
    ///
    /// # Errors
    ///
    /// Propagates the [`ApiError`] of a failed read.
    pub async fn lessons(
        &self,
        course_id: CourseId,
        filter: &str,
    ) -> Result<Vec<Lesson>, StoreError> {
        Ok(self.api.fetch_lessons(course_id, filter).await?)
    }

    /// Applies `changes` to the course with the given ID.
    ///
    /// The updated list is published to all subscribers synchronously,
    /// before this method returns, with only the changed position replaced
    /// (all the other positions keep their exact [`Rc`]s). The remote write
    /// is then dispatched as a detached task: the returned [`PendingWrite`]
    /// may be awaited for its outcome, but the local update is optimistic
    /// and a failed write is never rolled back.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownCourse`] if no course with the given ID exists.
    /// Nothing is published and no write is issued then.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a [`tokio`] runtime context, as the
    /// remote write is spawned onto it.
    pub fn save_course(
        &self,
        id: CourseId,
        changes: &CourseChanges,
    ) -> Result<PendingWrite, StoreError> {
        let mut courses = self.courses.get();
        let pos = courses
            .iter()
            .position(|c| c.id == id)
            .ok_or(StoreError::UnknownCourse(id))?;

        courses[pos] = Rc::new(courses[pos].merge(changes));
        self.courses.set(courses);

        let api = Arc::clone(&self.api);
        let changes = changes.clone();
        Ok(PendingWrite(tokio::spawn(async move {
            api.update_course(id, &changes).await
        })))
    }
}
