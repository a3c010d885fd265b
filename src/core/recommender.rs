use crate::core::scoring::calculate_fit_score;
use crate::models::{FitWeights, School, ScoredSchool, StudentProfile};

/// Schools scoring at or below this are never recommended
pub const DEFAULT_MIN_SCORE: f64 = 50.0;

/// Recommendation list cap
pub const DEFAULT_MAX_RESULTS: usize = 8;

/// Result of one recommendation run
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub recommendations: Vec<ScoredSchool>,
    pub total_candidates: usize,
}

/// Fit-scoring recommender
///
/// # Pipeline Stages
/// 1. Score every school against the profile
/// 2. Drop schools at or below the minimum score
/// 3. Rank by descending score (ties keep input order)
/// 4. Truncate to the result cap
#[derive(Debug, Clone)]
pub struct Recommender {
    weights: FitWeights,
    min_score: f64,
    max_results: usize,
}

impl Recommender {
    pub fn new(weights: FitWeights, min_score: f64, max_results: usize) -> Self {
        Self {
            weights,
            min_score,
            max_results,
        }
    }

    pub fn with_default_policy() -> Self {
        Self::new(FitWeights::default(), DEFAULT_MIN_SCORE, DEFAULT_MAX_RESULTS)
    }

    pub fn weights(&self) -> &FitWeights {
        &self.weights
    }

    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Score, rank and cap the schools for an applicant profile
    pub fn recommend(&self, schools: &[School], profile: &StudentProfile) -> Recommendation {
        let mut scored: Vec<ScoredSchool> = schools
            .iter()
            .filter_map(|school| {
                let (fit_score, breakdown) = calculate_fit_score(school, profile, &self.weights);

                if fit_score > self.min_score {
                    Some(ScoredSchool {
                        school: school.clone(),
                        fit_score,
                        breakdown,
                    })
                } else {
                    None
                }
            })
            .collect();

        // sort_by is stable, so equal scores stay in input order
        scored.sort_by(|a, b| b.fit_score.total_cmp(&a.fit_score));
        scored.truncate(self.max_results);

        Recommendation {
            recommendations: scored,
            total_candidates: schools.len(),
        }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_policy()
    }
}
