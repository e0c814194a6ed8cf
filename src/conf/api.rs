//! Catalog API client settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Catalog API client settings.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, SmartDefault)]
#[serde(default)]
pub struct Api {
    /// Base URL of the catalog backend.
    /// Defaults to `http://127.0.0.1:9000/api`.
    #[default(String::from("http://127.0.0.1:9000/api"))]
    pub base_url: String,

    /// Timeout applied to every single HTTP request.
    /// Defaults to `10s`.
    #[default(Duration::from_secs(10))]
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Page size bound applied when listing lessons. Defaults to `100`.
    #[default(100)]
    pub lessons_page_size: u32,
}
