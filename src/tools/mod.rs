// Applicant calculator tools
pub mod admissions;
pub mod germany;

pub use admissions::{estimate_percentile, percentile_report, predict_chance, selection_advice, AdmitChance, PercentileReport};
pub use germany::{assess_eligibility, estimate_cost, CityBand, CostEstimate, CostInput, EligibilityAssessment, EligibilityInput, GermanLevel, Verdict};
