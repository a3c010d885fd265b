use serde::{Deserialize, Serialize};
use crate::models::domain::{School, ScoredSchool};

/// Response for the directory search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub schools: Vec<School>,
    pub recommendations: Option<Vec<ScoredSchool>>,
    pub total_matches: usize,
    pub total_schools: usize,
}

/// Response for the fit recommendation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<ScoredSchool>,
    pub total_candidates: usize,
}

/// One page of the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolPage {
    pub schools: Vec<School>,
    pub offset: usize,
    pub limit: usize,
    pub total: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub catalog_source: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
