//! FSRS memory-model arithmetic.
//!
//! Free spaced-repetition scheduler formulas: a power-law forgetting
//! curve plus update rules for difficulty and stability. Uses the
//! published FSRS-4.5 default weights; per-user optimization is out of
//! scope.

use crate::domain::foundation::ReviewRating;

/// FSRS-4.5 default weights.
const W: [f64; 17] = [
    0.4872, 1.4003, 3.7145, 13.8206, 5.1618, 1.2298, 0.8975, 0.031, 1.6474, 0.1367, 1.0461,
    2.1072, 0.0793, 0.3246, 1.587, 0.2272, 2.8755,
];

/// Decay exponent of the forgetting curve.
const DECAY: f64 = -0.5;

/// Scale factor chosen so retrievability is 0.9 at `elapsed == stability`.
const FACTOR: f64 = 19.0 / 81.0;

const MIN_STABILITY: f64 = 0.1;
const MIN_DIFFICULTY: f64 = 1.0;
const MAX_DIFFICULTY: f64 = 10.0;

/// Probability of recall after `elapsed_days` given `stability`.
///
/// `R(t, S) = (1 + FACTOR * t / S) ^ DECAY`; equals 1.0 at t = 0 and
/// 0.9 at t = S.
pub fn retrievability(elapsed_days: f64, stability: f64) -> f64 {
    if stability <= 0.0 {
        return 0.0;
    }
    (1.0 + FACTOR * elapsed_days.max(0.0) / stability).powf(DECAY)
}

/// Interval in days at which retrievability decays to `retention`.
///
/// Inverse of [`retrievability`] solved for t.
pub fn interval_for_retention(stability: f64, retention: f64) -> f64 {
    stability / FACTOR * (retention.powf(1.0 / DECAY) - 1.0)
}

/// Initial stability after the first review.
pub fn initial_stability(rating: ReviewRating) -> f64 {
    W[rating.value() as usize - 1].max(MIN_STABILITY)
}

/// Initial difficulty after the first review.
pub fn initial_difficulty(rating: ReviewRating) -> f64 {
    let d = W[4] - (rating.value() as f64 - 3.0) * W[5];
    d.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
}

/// Difficulty update with mean reversion toward the Good baseline.
///
/// Again raises difficulty, Easy lowers it; repeated identical ratings
/// converge rather than saturating at the bounds immediately.
pub fn next_difficulty(difficulty: f64, rating: ReviewRating) -> f64 {
    let shifted = difficulty - W[6] * (rating.value() as f64 - 3.0);
    let reverted = W[7] * W[4] + (1.0 - W[7]) * shifted;
    reverted.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
}

/// Stability after a successful recall.
///
/// Growth is larger for easier cards (lower difficulty), lower current
/// stability, and lower retrievability at review time (the spacing
/// effect). Hard is penalized, Easy gets a bonus.
pub fn next_stability_on_success(
    stability: f64,
    difficulty: f64,
    retrievability: f64,
    rating: ReviewRating,
) -> f64 {
    let hard_penalty = if rating == ReviewRating::Hard { W[15] } else { 1.0 };
    let easy_bonus = if rating == ReviewRating::Easy { W[16] } else { 1.0 };
    let growth = W[8].exp()
        * (11.0 - difficulty)
        * stability.powf(-W[9])
        * ((W[10] * (1.0 - retrievability)).exp() - 1.0)
        * hard_penalty
        * easy_bonus;
    (stability * (1.0 + growth)).max(MIN_STABILITY)
}

/// Stability after a lapse (Again on a reviewed card).
///
/// Reduced but never zeroed, and never above the pre-lapse stability:
/// the card retains partial memory credit.
pub fn next_stability_on_lapse(stability: f64, difficulty: f64, retrievability: f64) -> f64 {
    let forgotten = W[11]
        * difficulty.powf(-W[12])
        * ((stability + 1.0).powf(W[13]) - 1.0)
        * (W[14] * (1.0 - retrievability)).exp();
    forgotten.clamp(MIN_STABILITY, stability.max(MIN_STABILITY))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retrievability_is_one_at_zero_elapsed() {
        assert!((retrievability(0.0, 10.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn retrievability_is_ninety_percent_at_stability() {
        assert!((retrievability(10.0, 10.0) - 0.9).abs() < 1e-9);
        assert!((retrievability(3.0, 3.0) - 0.9).abs() < 1e-9);
    }

    #[test]
    fn retrievability_decreases_with_elapsed_time() {
        let r1 = retrievability(1.0, 10.0);
        let r2 = retrievability(5.0, 10.0);
        let r3 = retrievability(50.0, 10.0);
        assert!(r1 > r2 && r2 > r3);
    }

    #[test]
    fn retrievability_of_zero_stability_is_zero() {
        assert_eq!(retrievability(1.0, 0.0), 0.0);
    }

    #[test]
    fn interval_inverts_retrievability() {
        let stability = 12.0;
        let interval = interval_for_retention(stability, 0.9);
        assert!((retrievability(interval, stability) - 0.9).abs() < 1e-9);
    }

    #[test]
    fn interval_equals_stability_at_default_retention() {
        assert!((interval_for_retention(7.0, 0.9) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn higher_retention_means_shorter_interval() {
        let loose = interval_for_retention(10.0, 0.85);
        let strict = interval_for_retention(10.0, 0.95);
        assert!(strict < loose);
    }

    #[test]
    fn initial_stability_increases_with_rating() {
        let values: Vec<f64> = ReviewRating::ALL.iter().map(|r| initial_stability(*r)).collect();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn initial_difficulty_decreases_with_rating() {
        assert!(initial_difficulty(ReviewRating::Again) > initial_difficulty(ReviewRating::Good));
        assert!(initial_difficulty(ReviewRating::Good) > initial_difficulty(ReviewRating::Easy));
    }

    #[test]
    fn next_difficulty_stays_in_bounds() {
        let mut d = 10.0;
        for _ in 0..50 {
            d = next_difficulty(d, ReviewRating::Again);
        }
        assert!(d <= 10.0);

        let mut d = 1.0;
        for _ in 0..50 {
            d = next_difficulty(d, ReviewRating::Easy);
        }
        assert!(d >= 1.0);
    }

    #[test]
    fn again_raises_and_easy_lowers_difficulty() {
        assert!(next_difficulty(5.0, ReviewRating::Again) > 5.0);
        assert!(next_difficulty(5.0, ReviewRating::Easy) < 5.0);
    }

    #[test]
    fn success_grows_stability() {
        let s = next_stability_on_success(10.0, 5.0, 0.9, ReviewRating::Good);
        assert!(s > 10.0);
    }

    #[test]
    fn easy_grows_stability_more_than_hard() {
        let hard = next_stability_on_success(10.0, 5.0, 0.9, ReviewRating::Hard);
        let good = next_stability_on_success(10.0, 5.0, 0.9, ReviewRating::Good);
        let easy = next_stability_on_success(10.0, 5.0, 0.9, ReviewRating::Easy);
        assert!(hard < good && good < easy);
    }

    #[test]
    fn lapse_shrinks_but_keeps_stability_positive() {
        let s = next_stability_on_lapse(10.0, 5.0, 0.9);
        assert!(s > 0.0);
        assert!(s < 10.0);
    }

    #[test]
    fn lapse_stability_never_exceeds_previous() {
        // Very low difficulty and high stability stress the cap.
        let s = next_stability_on_lapse(0.5, 1.0, 1.0);
        assert!(s <= 0.5_f64.max(0.1));
    }
}
