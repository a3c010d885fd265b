// Core algorithm exports
pub mod currency;
pub mod explorer;
pub mod filters;
pub mod ladder;
pub mod recommender;
pub mod scoring;

pub use currency::{fee_in_usd, from_usd, to_usd, usd_rate};
pub use explorer::{page, ExploreResult, SchoolExplorer};
pub use filters::{filter_schools, matches_criteria, matches_query, parse_duration_months};
pub use ladder::{LadderDirection, ThresholdLadder};
pub use recommender::{Recommendation, Recommender, DEFAULT_MAX_RESULTS, DEFAULT_MIN_SCORE};
pub use scoring::calculate_fit_score;
