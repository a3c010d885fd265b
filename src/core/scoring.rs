use crate::core::currency::fee_in_usd;
use crate::core::ladder::ThresholdLadder;
use crate::models::{FeeTier, FitWeights, School, ScoreBreakdown, StudentProfile};

/// Share of the GMAT weight by distance between applicant and class average
const GMAT_CLOSENESS: ThresholdLadder<f64> = ThresholdLadder::at_most(
    &[(20.0, 1.0), (40.0, 0.75), (70.0, 0.5), (100.0, 0.25)],
    0.0,
);

/// Share of the experience weight by years above the school's minimum
const EXPERIENCE_SURPLUS: ThresholdLadder<f64> =
    ThresholdLadder::at_least(&[(2.0, 1.0), (0.0, 0.75), (-1.0, 0.4)], 0.0);

/// Share awarded to categorical components when the applicant has no preference
const UNSET_PREFERENCE_SHARE: f64 = 0.5;

/// Calculate a fit score (0-100) for a school against an applicant profile
///
/// score = gmat + experience + location + budget + career,
/// each component scaled to its maximum in `weights`.
pub fn calculate_fit_score(
    school: &School,
    profile: &StudentProfile,
    weights: &FitWeights,
) -> (f64, ScoreBreakdown) {
    let breakdown = ScoreBreakdown {
        gmat: gmat_share(school, profile) * weights.gmat,
        experience: experience_share(school, profile) * weights.experience,
        location: location_share(school, profile) * weights.location,
        budget: budget_share(school, profile) * weights.budget,
        career: career_share(school, profile) * weights.career,
    };

    (breakdown.total().clamp(0.0, 100.0), breakdown)
}

/// Closeness of the applicant's score to the class average; 0 when either is unknown
#[inline]
fn gmat_share(school: &School, profile: &StudentProfile) -> f64 {
    match (profile.gmat(), school.gmat()) {
        (Some(applicant), Some(average)) => GMAT_CLOSENESS.score((applicant - average).abs()),
        _ => 0.0,
    }
}

#[inline]
fn experience_share(school: &School, profile: &StudentProfile) -> f64 {
    EXPERIENCE_SURPLUS.score(profile.experience() - school.work_experience_floor())
}

fn location_share(school: &School, profile: &StudentProfile) -> f64 {
    let preferred = match profile.preferred_location.as_deref().map(str::trim) {
        Some(preferred) if !preferred.is_empty() => preferred,
        _ => return UNSET_PREFERENCE_SHARE,
    };

    let matched = [&school.region, &school.country, &school.location]
        .iter()
        .any(|field| field.trim().eq_ignore_ascii_case(preferred));

    if matched {
        1.0
    } else {
        0.0
    }
}

/// Full share when the school's fee tier is within budget
fn budget_share(school: &School, profile: &StudentProfile) -> f64 {
    let Some(budget) = profile.budget else {
        return UNSET_PREFERENCE_SHARE;
    };

    match fee_in_usd(school).map(FeeTier::for_usd) {
        Some(tier) if tier <= budget => 1.0,
        _ => 0.0,
    }
}

fn career_share(school: &School, profile: &StudentProfile) -> f64 {
    let goal = match profile.career_goal.as_deref().map(str::trim) {
        Some(goal) if !goal.is_empty() => goal.to_lowercase(),
        _ => return UNSET_PREFERENCE_SHARE,
    };

    let matched = school
        .specializations
        .iter()
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .any(|tag| tag.contains(&goal) || goal.contains(&tag));

    if matched {
        1.0
    } else {
        0.0
    }
}
