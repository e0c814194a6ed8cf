//! Catalog backend API.
//!
//! [`CatalogApi`] is the seam between the [`Store`] and the network: the
//! real [`HttpCatalogApi`] speaks HTTP, tests substitute their own
//! implementation.
//!
//! [`Store`]: crate::Store

mod http;

use async_trait::async_trait;
use derive_more::{Display, From};

use crate::model::{Course, CourseChanges, CourseId, Lesson};

pub use self::http::HttpCatalogApi;

/// Errors of interactions with the catalog backend.
///
/// All of them are terminal for the operation that produced them: there are
/// no retries, only propagation to the caller.
#[derive(Debug, Display, From)]
pub enum ApiError {
    /// Performing the HTTP request itself failed.
    #[display(fmt = "HTTP request failed: {}", _0)]
    Request(reqwest::Error),

    /// Backend answered with a non-success HTTP status.
    #[display(fmt = "unexpected HTTP status: {}", _0)]
    #[from(ignore)]
    BadStatus(reqwest::StatusCode),

    /// Response body cannot be interpreted as the expected payload.
    ///
    /// Treated identically to a failed request: the operation fails, nothing
    /// is partially applied.
    #[display(fmt = "malformed payload: {}", _0)]
    BadPayload(serde_json::Error),

    /// Configured base URL is not a valid URL.
    #[display(fmt = "invalid base URL: {}", _0)]
    InvalidBaseUrl(url::ParseError),
}

impl std::error::Error for ApiError {}

/// Client of the course catalog backend.
#[async_trait]
pub trait CatalogApi {
    /// Fetches the complete course collection.
    ///
    /// The backend answers with a keyed collection; the returned list is
    /// ordered by the response's key iteration order.
    async fn fetch_courses(&self) -> Result<Vec<Course>, ApiError>;

    /// Fetches the lessons of the given course matching the given free-text
    /// `filter`, bounded by the configured page size.
    async fn fetch_lessons(
        &self,
        course_id: CourseId,
        filter: &str,
    ) -> Result<Vec<Lesson>, ApiError>;

    /// Persists a partial update of the given course.
    async fn update_course(
        &self,
        id: CourseId,
        changes: &CourseChanges,
    ) -> Result<(), ApiError>;
}
