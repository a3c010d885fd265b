//! Study-in-Germany tools: eligibility scoring and cost of attendance.

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::core::currency::to_usd;
use crate::core::ladder::ThresholdLadder;

const ACADEMIC_POINTS: ThresholdLadder<f64> = ThresholdLadder::at_least(
    &[(85.0, 40.0), (75.0, 32.0), (65.0, 24.0), (55.0, 12.0)],
    0.0,
);

const IELTS_POINTS: ThresholdLadder<f64> = ThresholdLadder::at_least(
    &[(7.5, 30.0), (7.0, 25.0), (6.5, 20.0), (6.0, 10.0)],
    0.0,
);

const WORK_POINTS: ThresholdLadder<f64> =
    ThresholdLadder::at_least(&[(3.0, 20.0), (1.0, 12.0)], 5.0);

const VERDICT: ThresholdLadder<Verdict> = ThresholdLadder::at_least(
    &[(75.0, Verdict::Eligible), (55.0, Verdict::Borderline)],
    Verdict::NotEligible,
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GermanLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl GermanLevel {
    pub fn points(self) -> f64 {
        match self {
            GermanLevel::A1 => 2.0,
            GermanLevel::A2 => 4.0,
            GermanLevel::B1 => 6.0,
            GermanLevel::B2 => 8.0,
            GermanLevel::C1 | GermanLevel::C2 => 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Eligible,
    Borderline,
    NotEligible,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EligibilityInput {
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(rename = "academicPercentage")]
    pub academic_percentage: f64,
    #[validate(range(min = 0.0, max = 9.0))]
    #[serde(rename = "ieltsBand", default)]
    pub ielts_band: Option<f64>,
    #[validate(range(min = 0.0, max = 50.0))]
    #[serde(rename = "workExperienceYears", default)]
    pub work_experience_years: f64,
    #[serde(rename = "germanLevel", default)]
    pub german_level: Option<GermanLevel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityAssessment {
    pub score: f64,
    pub academic: f64,
    pub language: f64,
    pub experience: f64,
    pub german: f64,
    pub verdict: Verdict,
}

/// Score an applicant out of 100 for German master's admission
pub fn assess_eligibility(input: &EligibilityInput) -> EligibilityAssessment {
    let academic = ACADEMIC_POINTS.score(input.academic_percentage);
    let language = input.ielts_band.map_or(0.0, |band| IELTS_POINTS.score(band));
    let experience = WORK_POINTS.score(input.work_experience_years);
    let german = input.german_level.map_or(0.0, GermanLevel::points);

    let score = academic + language + experience + german;

    EligibilityAssessment {
        score,
        academic,
        language,
        experience,
        german,
        verdict: VERDICT.score(score),
    }
}

/// Living cost band of the study city
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CityBand {
    /// Munich, Frankfurt, Hamburg
    Tier1,
    #[default]
    Tier2,
    Tier3,
}

impl CityBand {
    pub fn monthly_living_eur(self) -> f64 {
        match self {
            CityBand::Tier1 => 1_200.0,
            CityBand::Tier2 => 950.0,
            CityBand::Tier3 => 850.0,
        }
    }
}

pub const HEALTH_INSURANCE_EUR_PER_MONTH: f64 = 120.0;

/// Funds a student visa applicant must show per year
pub const BLOCKED_ACCOUNT_EUR_PER_YEAR: f64 = 11_904.0;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CostInput {
    #[validate(range(min = 0.0))]
    #[serde(rename = "tuitionPerYearEur", default)]
    pub tuition_per_year_eur: f64,
    #[validate(range(min = 0.0))]
    #[serde(rename = "semesterFeeEur", default = "default_semester_fee")]
    pub semester_fee_eur: f64,
    #[serde(default)]
    pub city: CityBand,
    #[validate(range(min = 1, max = 60))]
    #[serde(default = "default_months")]
    pub months: u32,
}

fn default_semester_fee() -> f64 {
    350.0
}

fn default_months() -> u32 {
    12
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEstimate {
    pub tuition_eur: f64,
    pub semester_fees_eur: f64,
    pub living_eur: f64,
    pub insurance_eur: f64,
    pub total_eur: f64,
    pub total_usd: f64,
    pub blocked_account_eur: f64,
}

/// Estimate the cost of studying in Germany for the given number of months
pub fn estimate_cost(input: &CostInput) -> CostEstimate {
    let months = input.months as f64;
    let years = months / 12.0;
    let semesters = (months / 6.0).ceil();

    let tuition_eur = input.tuition_per_year_eur.max(0.0) * years;
    let semester_fees_eur = input.semester_fee_eur.max(0.0) * semesters;
    let living_eur = input.city.monthly_living_eur() * months;
    let insurance_eur = HEALTH_INSURANCE_EUR_PER_MONTH * months;
    let total_eur = tuition_eur + semester_fees_eur + living_eur + insurance_eur;

    CostEstimate {
        tuition_eur,
        semester_fees_eur,
        living_eur,
        insurance_eur,
        total_eur,
        total_usd: to_usd(total_eur, "EUR"),
        blocked_account_eur: BLOCKED_ACCOUNT_EUR_PER_YEAR,
    }
}
