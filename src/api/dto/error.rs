//! Error body shared by every failing response.

use serde::{Deserialize, Serialize};

/// `{"error": "<message>"}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
