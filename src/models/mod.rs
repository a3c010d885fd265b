// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    DurationBucket, FeeTier, FilterCriteria, FitWeights, RankingTier, RawNumber, School,
    ScoreBreakdown, ScoredSchool, StudentProfile,
};
pub use requests::{CutoffRequest, ListSchoolsQuery, PercentileRequest, SearchRequest};
pub use responses::{ErrorResponse, HealthResponse, RecommendResponse, SchoolPage, SearchResponse};
