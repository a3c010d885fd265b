use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{FilterCriteria, StudentProfile};

/// Request to search the directory, optionally ranking by fit
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[serde(default)]
    pub criteria: FilterCriteria,
    #[serde(default)]
    pub profile: Option<StudentProfile>,
    #[serde(default)]
    pub offset: usize,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: usize,
}

/// Query string for the paged catalog listing
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ListSchoolsQuery {
    #[serde(default)]
    pub offset: usize,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: usize,
}

fn default_limit() -> usize {
    20
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PercentileRequest {
    #[validate(range(min = 200.0, max = 800.0))]
    #[serde(rename = "gmatScore")]
    pub gmat_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CutoffRequest {
    #[validate(range(min = 0.0, max = 100.0))]
    pub percentile: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(rename = "schoolCutoff")]
    pub school_cutoff: f64,
}
