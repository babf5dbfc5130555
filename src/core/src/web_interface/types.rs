use serde::{Deserialize, Serialize};

use crate::session_pairing::{PairingSummary, SessionPair};

/// API error payload
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new<S: Into<String>>(error: S) -> Self {
        Self { error: error.into() }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionsResponse {
    pub pairs: Vec<SessionPair>,
    pub summary: PairingSummary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
