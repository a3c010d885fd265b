//! Score and percentile tools for MBA applicants.
//!
//! Each table here is its own policy. They look alike but are tuned for
//! different questions, so they are kept separate.

use serde::{Deserialize, Serialize};
use crate::core::ladder::ThresholdLadder;

/// GMAT total score -> approximate percentile
pub const GMAT_PERCENTILE: ThresholdLadder<f64> = ThresholdLadder::at_least(
    &[
        (760.0, 99.0),
        (740.0, 97.0),
        (720.0, 94.0),
        (700.0, 88.0),
        (680.0, 82.0),
        (650.0, 72.0),
        (600.0, 55.0),
        (550.0, 38.0),
        (500.0, 24.0),
    ],
    10.0,
);

pub const GMAT_MIN: f64 = 200.0;
pub const GMAT_MAX: f64 = 800.0;

/// Estimate the percentile for a GMAT score; `None` outside the 200-800 scale
pub fn estimate_percentile(gmat: f64) -> Option<f64> {
    if !(GMAT_MIN..=GMAT_MAX).contains(&gmat) {
        return None;
    }

    Some(GMAT_PERCENTILE.score(gmat))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdmitChance {
    Safe,
    Target,
    Reach,
    Unlikely,
}

/// Percentile margin over a school's cutoff -> admit chance
const CUTOFF_MARGIN: ThresholdLadder<AdmitChance> = ThresholdLadder::at_least(
    &[
        (5.0, AdmitChance::Safe),
        (0.0, AdmitChance::Target),
        (-5.0, AdmitChance::Reach),
    ],
    AdmitChance::Unlikely,
);

pub fn predict_chance(percentile: f64, school_cutoff: f64) -> AdmitChance {
    CUTOFF_MARGIN.score(percentile - school_cutoff)
}

const SELECTION_ADVICE: ThresholdLadder<&str> = ThresholdLadder::at_least(
    &[
        (95.0, "Apply to top schools"),
        (85.0, "Build a balanced list"),
        (70.0, "Focus on target schools"),
    ],
    "Strengthen profile before applying",
);

pub fn selection_advice(percentile: f64) -> &'static str {
    SELECTION_ADVICE.score(percentile)
}

/// Everything the percentile tool reports for one score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PercentileReport {
    #[serde(rename = "gmatScore")]
    pub gmat_score: f64,
    pub percentile: f64,
    pub advice: String,
}

pub fn percentile_report(gmat: f64) -> Option<PercentileReport> {
    estimate_percentile(gmat).map(|percentile| PercentileReport {
        gmat_score: gmat,
        percentile,
        advice: selection_advice(percentile).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_bands() {
        assert_eq!(estimate_percentile(800.0), Some(99.0));
        assert_eq!(estimate_percentile(720.0), Some(94.0));
        assert_eq!(estimate_percentile(719.0), Some(88.0));
        assert_eq!(estimate_percentile(200.0), Some(10.0));
    }

    #[test]
    fn test_percentile_out_of_scale() {
        assert_eq!(estimate_percentile(199.0), None);
        assert_eq!(estimate_percentile(801.0), None);
        assert_eq!(estimate_percentile(f64::NAN), None);
    }

    #[test]
    fn test_percentile_is_monotone() {
        let mut previous = 0.0;
        for score in (200..=800).step_by(10) {
            let percentile = estimate_percentile(score as f64).unwrap();
            assert!(percentile >= previous);
            previous = percentile;
        }
    }

    #[test]
    fn test_predict_chance() {
        assert_eq!(predict_chance(95.0, 85.0), AdmitChance::Safe);
        assert_eq!(predict_chance(85.0, 85.0), AdmitChance::Target);
        assert_eq!(predict_chance(82.0, 85.0), AdmitChance::Reach);
        assert_eq!(predict_chance(60.0, 85.0), AdmitChance::Unlikely);
    }

    #[test]
    fn test_selection_advice() {
        assert_eq!(selection_advice(97.0), "Apply to top schools");
        assert_eq!(selection_advice(40.0), "Strengthen profile before applying");
    }

    #[test]
    fn test_tables_are_ordered() {
        assert!(GMAT_PERCENTILE.is_well_ordered());
        assert!(CUTOFF_MARGIN.is_well_ordered());
        assert!(SELECTION_ADVICE.is_well_ordered());
    }
}
