//! Campus Match - business school discovery service
//!
//! This library provides the directory filter and the fit-score recommender
//! behind the Campus Match school explorer, plus the applicant calculators
//! (GMAT percentile, cutoff chance, Germany eligibility and cost).

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;
pub mod tools;

// Re-export commonly used types
pub use core::{calculate_fit_score, filter_schools, Recommendation, Recommender, SchoolExplorer};
pub use models::{FilterCriteria, FitWeights, School, ScoredSchool, StudentProfile};
pub use services::{CatalogError, SchoolCatalog};
