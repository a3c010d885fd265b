use crate::core::{
    filters::filter_schools,
    recommender::{Recommendation, Recommender},
};
use crate::models::{FilterCriteria, School, StudentProfile};

/// Result of one directory pass
#[derive(Debug, Clone, PartialEq)]
pub struct ExploreResult {
    pub schools: Vec<School>,
    pub recommendation: Option<Recommendation>,
    pub total_schools: usize,
}

/// Directory pipeline: record source -> predicate filter -> optional fit ranking
#[derive(Debug, Clone, Default)]
pub struct SchoolExplorer {
    recommender: Recommender,
}

impl SchoolExplorer {
    pub fn new(recommender: Recommender) -> Self {
        Self { recommender }
    }

    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }

    /// Filter the catalog and, when a profile is given, rank the filtered set by fit
    pub fn explore(
        &self,
        schools: &[School],
        criteria: &FilterCriteria,
        profile: Option<&StudentProfile>,
    ) -> ExploreResult {
        let filtered = filter_schools(schools, criteria);

        let recommendation = profile.map(|profile| self.recommender.recommend(&filtered, profile));

        ExploreResult {
            schools: filtered,
            recommendation,
            total_schools: schools.len(),
        }
    }

    /// Rank the whole catalog by fit
    pub fn recommend(&self, schools: &[School], profile: &StudentProfile) -> Recommendation {
        self.recommender.recommend(schools, profile)
    }
}

/// Offset/limit slice; out-of-range offsets yield an empty page
pub fn page<T: Clone>(items: &[T], offset: usize, limit: usize) -> Vec<T> {
    items.iter().skip(offset).take(limit).cloned().collect()
}
