use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A numeric field as delivered by upstream data: either a JSON number or a
/// display string such as `"73,440"` or `"$89,000"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    /// Numeric value, or `None` when the field cannot be read as a finite number
    pub fn value(&self) -> Option<f64> {
        let parsed = match self {
            RawNumber::Number(n) => Some(*n),
            RawNumber::Text(text) => {
                let cleaned: String = text
                    .trim()
                    .chars()
                    .filter(|c| !matches!(c, ',' | '_' | ' ' | '$' | '€' | '£' | '₹'))
                    .collect();
                cleaned.parse::<f64>().ok()
            }
        };

        parsed.filter(|v| v.is_finite())
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        RawNumber::Number(value)
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        RawNumber::Text(value.to_string())
    }
}

/// School (directory record) as returned by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub id: u32,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(default, deserialize_with = "lenient_option")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient_ranking")]
    pub ranking: Option<u32>,
    #[serde(rename = "tuitionFee", default, deserialize_with = "lenient_option")]
    pub tuition_fee: Option<RawNumber>,
    #[serde(default = "default_currency", deserialize_with = "deserialize_currency")]
    pub currency: String,
    #[serde(rename = "averageGmat", default, deserialize_with = "lenient_option")]
    pub average_gmat: Option<RawNumber>,
    #[serde(rename = "minWorkExperience", default, deserialize_with = "lenient_option")]
    pub min_work_experience: Option<RawNumber>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub specializations: Vec<String>,
}

impl School {
    /// Tuition fee in its original currency
    pub fn fee(&self) -> Option<f64> {
        self.tuition_fee.as_ref().and_then(RawNumber::value)
    }

    pub fn gmat(&self) -> Option<f64> {
        self.average_gmat.as_ref().and_then(RawNumber::value)
    }

    /// Minimum work experience in years, 0 when the school states none
    pub fn work_experience_floor(&self) -> f64 {
        self.min_work_experience
            .as_ref()
            .and_then(RawNumber::value)
            .unwrap_or(0.0)
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

// Upstream records are loosely typed. A null or mistyped optional field
// must not drop the whole record, so these readers fall back to the
// field's unset value instead of failing.

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    Ok(lenient_option(deserializer)?.unwrap_or_default())
}

/// Read the whole value first so a mistyped field never leaves the input half-consumed
fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    Ok(serde_json::from_value(value).ok())
}

fn deserialize_currency<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let code: Option<String> = lenient_option(deserializer)?;

    Ok(code
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(default_currency))
}

/// Rankings arrive as numbers or text ("12", "N/A"); anything that is not
/// a positive whole number reads as unranked
fn lenient_ranking<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawNumber> = lenient_option(deserializer)?;

    Ok(raw
        .and_then(|r| r.value())
        .filter(|v| *v >= 1.0 && v.fract() == 0.0 && *v <= u32::MAX as f64)
        .map(|v| v as u32))
}

/// Tags: null reads as none, non-string entries are dropped
fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<serde_json::Value>> = lenient_option(deserializer)?;

    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|tag| match tag {
            serde_json::Value::String(tag) => Some(tag),
            _ => None,
        })
        .collect())
}

/// Ranking tier selector; a school qualifies when `ranking <= limit`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RankingTier {
    #[serde(rename = "top-10")]
    Top10,
    #[serde(rename = "top-25")]
    Top25,
    #[serde(rename = "top-50")]
    Top50,
    #[serde(rename = "top-100")]
    Top100,
}

impl RankingTier {
    pub fn limit(self) -> u32 {
        match self {
            RankingTier::Top10 => 10,
            RankingTier::Top25 => 25,
            RankingTier::Top50 => 50,
            RankingTier::Top100 => 100,
        }
    }
}

impl FromStr for RankingTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "top10" => Ok(RankingTier::Top10),
            "top25" => Ok(RankingTier::Top25),
            "top50" => Ok(RankingTier::Top50),
            "top100" => Ok(RankingTier::Top100),
            _ => Err(format!("unknown ranking tier: {}", s)),
        }
    }
}

/// Fee tier over USD-normalized tuition. Boundary values belong to the lower tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeTier {
    Low,
    Medium,
    High,
}

impl FeeTier {
    pub const LOW_CEILING_USD: f64 = 50_000.0;
    pub const MEDIUM_CEILING_USD: f64 = 80_000.0;

    pub fn for_usd(amount: f64) -> FeeTier {
        if amount <= Self::LOW_CEILING_USD {
            FeeTier::Low
        } else if amount <= Self::MEDIUM_CEILING_USD {
            FeeTier::Medium
        } else {
            FeeTier::High
        }
    }
}

impl FromStr for FeeTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "low" | "under50k" => Ok(FeeTier::Low),
            "medium" | "mid" | "50kto80k" => Ok(FeeTier::Medium),
            "high" | "over80k" => Ok(FeeTier::High),
            _ => Err(format!("unknown fee tier: {}", s)),
        }
    }
}

/// Program length bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DurationBucket {
    #[serde(rename = "one-year")]
    OneYear,
    #[serde(rename = "eighteen-months")]
    EighteenMonths,
    #[serde(rename = "two-year")]
    TwoYear,
}

impl DurationBucket {
    pub fn for_months(months: f64) -> DurationBucket {
        if months <= 12.0 {
            DurationBucket::OneYear
        } else if months <= 18.0 {
            DurationBucket::EighteenMonths
        } else {
            DurationBucket::TwoYear
        }
    }
}

impl FromStr for DurationBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "oneyear" | "1year" | "1" => Ok(DurationBucket::OneYear),
            "eighteenmonths" | "18months" | "18" => Ok(DurationBucket::EighteenMonths),
            "twoyear" | "2years" | "2year" | "2" => Ok(DurationBucket::TwoYear),
            _ => Err(format!("unknown duration bucket: {}", s)),
        }
    }
}

fn normalize_token(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Deserialize a UI selector, treating `"all"`, `"any"` and blank values as unset
pub(crate) fn deserialize_selector<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;

    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") || v.eq_ignore_ascii_case("any") => Ok(None),
        Some(v) => v.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Directory filter criteria. Every field defaults to "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, deserialize_with = "deserialize_selector")]
    pub query: Option<String>,
    #[serde(default, deserialize_with = "deserialize_selector")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "deserialize_selector")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "deserialize_selector")]
    pub duration: Option<DurationBucket>,
    #[serde(rename = "rankingTier", default, deserialize_with = "deserialize_selector")]
    pub ranking_tier: Option<RankingTier>,
    #[serde(rename = "feeTier", default, deserialize_with = "deserialize_selector")]
    pub fee_tier: Option<FeeTier>,
}

impl FilterCriteria {
    /// True when no criterion constrains the result
    pub fn is_unconstrained(&self) -> bool {
        self.query.as_deref().map_or(true, |q| q.trim().is_empty())
            && self.region.is_none()
            && self.country.is_none()
            && self.duration.is_none()
            && self.ranking_tier.is_none()
            && self.fee_tier.is_none()
    }
}

/// Applicant profile used for fit scoring
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    #[serde(rename = "gmatScore", default)]
    pub gmat_score: Option<RawNumber>,
    #[serde(rename = "experience", alias = "experienceYears", default)]
    pub experience_years: Option<RawNumber>,
    #[serde(rename = "preferredLocation", alias = "location", default, deserialize_with = "deserialize_selector")]
    pub preferred_location: Option<String>,
    #[serde(default, deserialize_with = "deserialize_selector")]
    pub budget: Option<FeeTier>,
    #[serde(rename = "careerGoal", default, deserialize_with = "deserialize_selector")]
    pub career_goal: Option<String>,
}

impl StudentProfile {
    pub fn gmat(&self) -> Option<f64> {
        self.gmat_score.as_ref().and_then(RawNumber::value)
    }

    pub fn experience(&self) -> f64 {
        self.experience_years
            .as_ref()
            .and_then(RawNumber::value)
            .unwrap_or(0.0)
    }
}

/// Per-component fit points
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub gmat: f64,
    pub experience: f64,
    pub location: f64,
    pub budget: f64,
    pub career: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.gmat + self.experience + self.location + self.budget + self.career
    }
}

/// School with its fit score for one recommendation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSchool {
    #[serde(flatten)]
    pub school: School,
    #[serde(rename = "fitScore")]
    pub fit_score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Maximum points per scoring component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitWeights {
    pub gmat: f64,
    pub experience: f64,
    pub location: f64,
    pub budget: f64,
    pub career: f64,
}

impl FitWeights {
    pub fn sum(&self) -> f64 {
        self.gmat + self.experience + self.location + self.budget + self.career
    }
}

impl Default for FitWeights {
    fn default() -> Self {
        Self {
            gmat: 40.0,
            experience: 20.0,
            location: 15.0,
            budget: 15.0,
            career: 10.0,
        }
    }
}
