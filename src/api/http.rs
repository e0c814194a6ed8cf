//! [`CatalogApi`] implementation speaking HTTP to the real backend.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;

use crate::{
    conf,
    model::{Course, CourseChanges, CourseId, Lesson},
};

use super::{ApiError, CatalogApi};

/// Response of the course collection endpoint: the named `payload` field
/// holds a keyed collection of course records.
#[derive(Debug, Deserialize)]
struct CoursesResponse {
    payload: Map<String, Value>,
}

/// Response of the lessons endpoint: the named `payload` field holds an
/// ordered list.
#[derive(Debug, Deserialize)]
struct LessonsResponse {
    payload: Vec<Lesson>,
}

/// [`CatalogApi`] implementation over plain HTTP.
///
/// Cheaply cloneable: clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct HttpCatalogApi {
    /// HTTP client performing all the requests.
    client: reqwest::Client,

    /// Base URL of the catalog backend, with a guaranteed trailing `/`.
    base_url: Url,

    /// Page size bound applied when listing lessons.
    lessons_page_size: u32,
}

impl HttpCatalogApi {
    /// Creates a new [`HttpCatalogApi`] out of the provided configuration.
    ///
    /// # Errors
    ///
    /// Errors if the configured base URL is invalid or the underlying HTTP
    /// client cannot be initialized.
    pub fn new(conf: &conf::Api) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(&conf.base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(conf.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url,
            lessons_page_size: conf.lessons_page_size,
        })
    }

    /// Resolves the given path against the configured base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }
}

/// Converts the keyed course collection of a [`CoursesResponse`] into an
/// ordered list, in the key iteration order of the response document.
///
/// That order is whatever the backend serialized, which is not guaranteed to
/// be stable across backends.
fn courses_from_payload(
    payload: Map<String, Value>,
) -> Result<Vec<Course>, ApiError> {
    payload
        .into_iter()
        .map(|(_, value)| {
            serde_json::from_value(value).map_err(ApiError::BadPayload)
        })
        .collect()
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn fetch_courses(&self) -> Result<Vec<Course>, ApiError> {
        let url = self.endpoint("courses")?;
        log::debug!("GET {}", url);

        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::BadStatus(resp.status()));
        }

        let body: CoursesResponse =
            serde_json::from_slice(&resp.bytes().await?)?;
        courses_from_payload(body.payload)
    }

    async fn fetch_lessons(
        &self,
        course_id: CourseId,
        filter: &str,
    ) -> Result<Vec<Lesson>, ApiError> {
        let mut url = self.endpoint("lessons")?;
        url.query_pairs_mut()
            .append_pair("courseId", &course_id.to_string())
            .append_pair("pageSize", &self.lessons_page_size.to_string())
            .append_pair("filter", filter);
        log::debug!("GET {}", url);

        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::BadStatus(resp.status()));
        }

        let body: LessonsResponse =
            serde_json::from_slice(&resp.bytes().await?)?;
        Ok(body.payload)
    }

    async fn update_course(
        &self,
        id: CourseId,
        changes: &CourseChanges,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("courses/{}", id))?;
        log::debug!("PUT {}", url);

        let resp = self.client.put(url).json(changes).send().await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(ApiError::BadStatus(resp.status()))
        }
    }
}

#[cfg(test)]
mod endpoint_specs {
    use serde_json::json;

    use crate::conf;

    use super::{courses_from_payload, HttpCatalogApi};

    fn api(base_url: &str) -> HttpCatalogApi {
        HttpCatalogApi::new(&conf::Api {
            base_url: base_url.to_owned(),
            ..conf::Api::default()
        })
        .unwrap()
    }

    #[test]
    fn joins_base_url_without_trailing_slash() {
        let api = api("http://127.0.0.1:9000/api");
        assert_eq!(
            api.endpoint("courses").unwrap().as_str(),
            "http://127.0.0.1:9000/api/courses",
        );
    }

    #[test]
    fn joins_base_url_with_trailing_slash() {
        let api = api("http://127.0.0.1:9000/api/");
        assert_eq!(
            api.endpoint("courses/2").unwrap().as_str(),
            "http://127.0.0.1:9000/api/courses/2",
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(HttpCatalogApi::new(&conf::Api {
            base_url: "not a url".to_owned(),
            ..conf::Api::default()
        })
        .is_err());
    }

    #[test]
    fn courses_payload_preserves_key_order() {
        let payload = json!({
            "11": {"id": 11, "category": "ADVANCED"},
            "2": {"id": 2, "category": "BEGINNER"},
        });
        let payload = match payload {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };

        let courses = courses_from_payload(payload).unwrap();

        assert_eq!(courses.len(), 2);
        assert_eq!(u64::from(courses[0].id), 11);
        assert_eq!(u64::from(courses[1].id), 2);
    }

    #[test]
    fn malformed_course_record_fails_the_whole_read() {
        let payload = json!({
            "1": {"id": 1, "category": "BEGINNER"},
            "2": {"category": "no id here"},
        });
        let payload = match payload {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };

        assert!(courses_from_payload(payload).is_err());
    }
}
