use serde::{Deserialize, Serialize};
use crate::models::domain::RankedCandidate;

/// Response for both ranking endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResponse {
    pub ranking_id: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    /// Input list size before exclusion
    pub total_candidates: usize,
    /// Records dropped for capacity or eligibility
    pub excluded: usize,
    pub candidates: Vec<RankedCandidate>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
