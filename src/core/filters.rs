use crate::core::currency::fee_in_usd;
use crate::models::{DurationBucket, FeeTier, FilterCriteria, RankingTier, School};

/// Check if a school satisfies every active criterion
///
/// Inactive (`None`) criteria impose no constraint. A school missing the
/// field a criterion looks at fails only that criterion.
#[inline]
pub fn matches_criteria(school: &School, criteria: &FilterCriteria) -> bool {
    if let Some(query) = criteria.query.as_deref() {
        if !matches_query(school, query) {
            return false;
        }
    }

    if let Some(region) = criteria.region.as_deref() {
        if !school.region.trim().eq_ignore_ascii_case(region.trim()) {
            return false;
        }
    }

    if let Some(country) = criteria.country.as_deref() {
        if !school.country.trim().eq_ignore_ascii_case(country.trim()) {
            return false;
        }
    }

    if let Some(bucket) = criteria.duration {
        if !matches_duration(school, bucket) {
            return false;
        }
    }

    if let Some(tier) = criteria.ranking_tier {
        if !matches_ranking_tier(school, tier) {
            return false;
        }
    }

    if let Some(tier) = criteria.fee_tier {
        if !matches_fee_tier(school, tier) {
            return false;
        }
    }

    true
}

/// Stable filter: returns the matching schools in input order
pub fn filter_schools(schools: &[School], criteria: &FilterCriteria) -> Vec<School> {
    if criteria.is_unconstrained() {
        return schools.to_vec();
    }

    schools
        .iter()
        .filter(|school| matches_criteria(school, criteria))
        .cloned()
        .collect()
}

/// Case-insensitive text match over name, location and specialization tags
///
/// A blank query matches everything.
pub fn matches_query(school: &School, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    school.name.to_lowercase().contains(&needle)
        || school.location.to_lowercase().contains(&needle)
        || school
            .specializations
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

/// Ranking tiers are cumulative and inclusive: rank 10 is in the top 10
#[inline]
pub fn matches_ranking_tier(school: &School, tier: RankingTier) -> bool {
    school.ranking.map_or(false, |rank| rank <= tier.limit())
}

#[inline]
pub fn matches_fee_tier(school: &School, tier: FeeTier) -> bool {
    fee_in_usd(school).map_or(false, |usd| FeeTier::for_usd(usd) == tier)
}

pub fn matches_duration(school: &School, bucket: DurationBucket) -> bool {
    school
        .duration
        .as_deref()
        .and_then(parse_duration_months)
        .map_or(false, |months| DurationBucket::for_months(months) == bucket)
}

/// Parse program length text into months
///
/// Accepts forms such as "1 year", "2 years", "15 months", "18-month",
/// "1.5 years" and a bare number (read as months).
pub fn parse_duration_months(text: &str) -> Option<f64> {
    let lower = text.trim().to_lowercase();

    let number_end = lower
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(lower.len());
    let amount: f64 = lower[..number_end].parse().ok()?;
    if !amount.is_finite() || amount <= 0.0 {
        return None;
    }

    let unit = lower[number_end..].trim_start_matches(|c: char| c == '-' || c.is_whitespace());

    if unit.is_empty() || unit.starts_with("month") || unit.starts_with("mo") {
        Some(amount)
    } else if unit.starts_with("year") || unit.starts_with("yr") {
        Some(amount * 12.0)
    } else {
        None
    }
}
