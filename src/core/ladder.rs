//! Threshold ladders: ordered `(threshold, score)` steps walked once.
//!
//! Every banded policy in the crate (fit components, percentile tables,
//! eligibility points) is expressed as a ladder so the policy data can be
//! tested apart from the walking logic.

/// Comparison applied at each step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LadderDirection {
    /// Steps sorted by descending threshold; first `value >= threshold` wins
    AtLeast,
    /// Steps sorted by ascending threshold; first `value <= threshold` wins
    AtMost,
}

#[derive(Debug, Clone, Copy)]
pub struct ThresholdLadder<T: Copy + 'static> {
    direction: LadderDirection,
    steps: &'static [(f64, T)],
    floor: T,
}

impl<T: Copy + 'static> ThresholdLadder<T> {
    pub const fn at_least(steps: &'static [(f64, T)], floor: T) -> Self {
        Self {
            direction: LadderDirection::AtLeast,
            steps,
            floor,
        }
    }

    pub const fn at_most(steps: &'static [(f64, T)], floor: T) -> Self {
        Self {
            direction: LadderDirection::AtMost,
            steps,
            floor,
        }
    }

    /// Map a value to its band. Non-finite values land on the floor.
    #[inline]
    pub fn score(&self, value: f64) -> T {
        if !value.is_finite() {
            return self.floor;
        }

        self.steps
            .iter()
            .find(|(threshold, _)| match self.direction {
                LadderDirection::AtLeast => value >= *threshold,
                LadderDirection::AtMost => value <= *threshold,
            })
            .map(|(_, score)| *score)
            .unwrap_or(self.floor)
    }

    /// Thresholds are sorted in walking order
    pub fn is_well_ordered(&self) -> bool {
        self.steps.windows(2).all(|pair| match self.direction {
            LadderDirection::AtLeast => pair[0].0 > pair[1].0,
            LadderDirection::AtMost => pair[0].0 < pair[1].0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRADES: ThresholdLadder<f64> =
        ThresholdLadder::at_least(&[(90.0, 3.0), (75.0, 2.0), (50.0, 1.0)], 0.0);

    const CLOSENESS: ThresholdLadder<f64> =
        ThresholdLadder::at_most(&[(10.0, 1.0), (30.0, 0.5)], 0.0);

    #[test]
    fn test_at_least_walks_descending() {
        assert_eq!(GRADES.score(95.0), 3.0);
        assert_eq!(GRADES.score(90.0), 3.0);
        assert_eq!(GRADES.score(89.9), 2.0);
        assert_eq!(GRADES.score(50.0), 1.0);
        assert_eq!(GRADES.score(10.0), 0.0);
    }

    #[test]
    fn test_at_most_walks_ascending() {
        assert_eq!(CLOSENESS.score(0.0), 1.0);
        assert_eq!(CLOSENESS.score(10.0), 1.0);
        assert_eq!(CLOSENESS.score(25.0), 0.5);
        assert_eq!(CLOSENESS.score(31.0), 0.0);
    }

    #[test]
    fn test_non_finite_hits_floor() {
        assert_eq!(GRADES.score(f64::NAN), 0.0);
        assert_eq!(GRADES.score(f64::INFINITY), 0.0);
        assert_eq!(CLOSENESS.score(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_ordering_check() {
        assert!(GRADES.is_well_ordered());
        assert!(CLOSENESS.is_well_ordered());

        let unordered = ThresholdLadder::at_least(&[(10.0, 1u8), (20.0, 2u8)], 0u8);
        assert!(!unordered.is_well_ordered());
    }

    #[test]
    fn test_categorical_output() {
        let ladder = ThresholdLadder::at_least(&[(1.0, "positive")], "non-positive");
        assert_eq!(ladder.score(3.0), "positive");
        assert_eq!(ladder.score(-3.0), "non-positive");
    }
}
