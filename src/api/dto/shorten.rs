//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};

/// Field of the request body holding the URL to shorten.
pub const URL_FIELD: &str = "url";

/// Response for a successfully created short link.
///
/// ```json
/// { "url": "https://example.com", "short_url": "1a2b3c4d" }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub url: String,
    pub short_url: String,
}
