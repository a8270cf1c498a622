//! Property tests for the scheduling math.
//!
//! Exercises the review state machine over randomized memory states and
//! ratings, checking the bounds that hold for every input: intervals
//! stay inside [1 day, tier maximum], difficulty stays on its 1-10
//! scale, and lapses only ever move one way.

use proptest::prelude::*;

use study_coach::adapters::SeededRandom;
use study_coach::domain::foundation::{CardState, ReviewRating, Timestamp};
use study_coach::domain::scheduler::{
    interval_for_retention, retrievability, review, CardMemoryState, SchedulerConfig,
};

fn now() -> Timestamp {
    Timestamp::from_unix_secs(1_710_500_400)
}

fn arb_rating() -> impl Strategy<Value = ReviewRating> {
    (1u8..=4).prop_map(|v| ReviewRating::try_from_u8(v).unwrap())
}

fn arb_review_state() -> impl Strategy<Value = CardMemoryState> {
    (
        0.1f64..400.0,   // stability
        1.0f64..=10.0,   // difficulty
        1u32..200,       // reps
        0u32..50,        // lapses
        0i64..365,       // days since last review
        prop_oneof![Just(CardState::Review), Just(CardState::Relearning)],
    )
        .prop_map(|(stability, difficulty, reps, lapses, elapsed, state)| {
            let last_review = now().minus_days(elapsed);
            CardMemoryState {
                due: now(),
                stability,
                difficulty,
                reps,
                lapses,
                state,
                last_review: Some(last_review),
            }
        })
}

fn arb_config() -> impl Strategy<Value = SchedulerConfig> {
    (0.5f64..0.99, 1u32..500, any::<bool>()).prop_map(|(retention, max, fuzz)| SchedulerConfig {
        target_retention: retention,
        maximum_interval_days: max,
        enable_fuzz: fuzz,
        enable_short_term: true,
    })
}

proptest! {
    #[test]
    fn review_intervals_respect_tier_bounds(
        state in arb_review_state(),
        rating in arb_rating(),
        config in arb_config(),
        seed in any::<u64>(),
    ) {
        let mut rng = SeededRandom::new(seed);
        let (next, outcome) = review(&state, rating, &config, now(), &mut rng);

        if next.state == CardState::Review {
            prop_assert!(outcome.interval_days >= 1.0);
            prop_assert!(outcome.interval_days <= config.maximum_interval_days as f64);
        } else {
            // Learning-phase steps are sub-day.
            prop_assert!(outcome.interval_days < 1.0);
        }
        prop_assert!(next.due.is_after(&now()));
    }

    #[test]
    fn difficulty_and_stability_stay_in_range(
        state in arb_review_state(),
        rating in arb_rating(),
        config in arb_config(),
        seed in any::<u64>(),
    ) {
        let mut rng = SeededRandom::new(seed);
        let (next, _) = review(&state, rating, &config, now(), &mut rng);

        prop_assert!(next.difficulty >= 1.0 && next.difficulty <= 10.0);
        prop_assert!(next.stability > 0.0);
    }

    #[test]
    fn lapses_and_reps_are_monotone(
        state in arb_review_state(),
        rating in arb_rating(),
        config in arb_config(),
        seed in any::<u64>(),
    ) {
        let mut rng = SeededRandom::new(seed);
        let (next, _) = review(&state, rating, &config, now(), &mut rng);

        prop_assert!(next.lapses >= state.lapses);
        prop_assert!(next.reps >= state.reps);
        if rating.is_again() {
            prop_assert_eq!(next.lapses, state.lapses + 1);
            prop_assert_eq!(next.reps, state.reps);
        } else {
            prop_assert_eq!(next.lapses, state.lapses);
            prop_assert_eq!(next.reps, state.reps + 1);
        }
    }

    #[test]
    fn lapse_never_raises_stability(
        state in arb_review_state(),
        config in arb_config(),
        seed in any::<u64>(),
    ) {
        let mut rng = SeededRandom::new(seed);
        let (next, _) = review(&state, ReviewRating::Again, &config, now(), &mut rng);
        prop_assert!(next.stability <= state.stability);
    }

    #[test]
    fn retrievability_decays_with_time(
        stability in 0.5f64..200.0,
        early in 0.0f64..100.0,
        extra in 0.1f64..100.0,
    ) {
        let sooner = retrievability(early, stability);
        let later = retrievability(early + extra, stability);
        prop_assert!(sooner >= later);
        prop_assert!((0.0..=1.0).contains(&sooner));
    }

    #[test]
    fn interval_hits_the_requested_retention(
        stability in 0.5f64..200.0,
        retention in 0.5f64..0.99,
    ) {
        let interval = interval_for_retention(stability, retention);
        prop_assert!(interval > 0.0);
        let recall = retrievability(interval, stability);
        prop_assert!((recall - retention).abs() < 1e-6);
    }
}
