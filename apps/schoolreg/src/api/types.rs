//! JSON bodies returned by the HTTP API.

use schoolreg_core::{School, SchoolId};
use serde::{Deserialize, Serialize};

/// `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

/// `POST /api/schools` on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "schoolId")]
    pub school_id: SchoolId,
}

impl CreatedResponse {
    pub fn new(school_id: SchoolId) -> Self {
        Self {
            success: true,
            message: "School added successfully".to_owned(),
            school_id,
        }
    }
}

/// `GET /api/schools` on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub success: bool,
    pub schools: Vec<School>,
}

/// Any non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
