//! Domain model of the course catalog.

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// ID of a [`Course`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct CourseId(pub u64);

/// ID of a [`Lesson`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub struct LessonId(pub u64);

/// Single course of the catalog.
///
/// Only the ID and the category are interpreted by this library. Everything
/// else the backend sends (description, icons, lessons count and so on) is
/// carried opaquely in [`Course::rest`] and round-tripped as is.
///
/// IDs are unique within any published course list.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Course {
    /// Unique ID of this course.
    pub id: CourseId,

    /// Category label of this course (`"BEGINNER"`, `"ADVANCED"`, ...).
    pub category: String,

    /// All the other attributes of this course, untouched.
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl Course {
    /// Returns a copy of this [`Course`] with `changes` shallow-merged over
    /// it.
    ///
    /// Fields present in `changes` override, all the other fields keep their
    /// prior values.
    #[must_use]
    pub fn merge(&self, changes: &CourseChanges) -> Self {
        let mut merged = self.clone();
        if let Some(category) = &changes.category {
            merged.category = category.clone();
        }
        for (key, value) in &changes.rest {
            let _ = merged.rest.insert(key.clone(), value.clone());
        }
        merged
    }
}

/// Partial update of a single [`Course`].
///
/// Serializes to the body of the update request: absent fields are omitted,
/// not sent as nulls.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct CourseChanges {
    /// New category label, if it's changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Changes of any other attributes.
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl CourseChanges {
    /// Returns [`CourseChanges`] setting only the category label.
    #[inline]
    pub fn category<S: Into<String>>(category: S) -> Self {
        Self {
            category: Some(category.into()),
            rest: Map::new(),
        }
    }
}

/// Single lesson of a [`Course`].
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Lesson {
    /// Unique ID of this lesson.
    pub id: LessonId,

    /// ID of the [`Course`] this lesson belongs to.
    #[serde(rename = "courseId")]
    pub course_id: CourseId,

    /// All the other attributes of this lesson (description, duration,
    /// sequence number and so on), untouched.
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}
