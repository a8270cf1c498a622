//! Review state machine - rating in, next memory state out.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CardState, ReviewRating, Timestamp};

use super::config::SchedulerConfig;
use super::fsrs;
use super::fuzz::{fuzz_interval, MidpointSource, RandomSource};
use super::memory_state::CardMemoryState;

/// Learning step after Again on a New or Learning card, in minutes.
const LEARNING_STEP_AGAIN_MINUTES: i64 = 1;
/// Learning step after Hard on a first review, in minutes.
const LEARNING_STEP_HARD_MINUTES: i64 = 6;
/// Learning step after Good on a first review, in minutes.
const LEARNING_STEP_GOOD_MINUTES: i64 = 10;
/// Relearning step after a lapse, in minutes.
const RELEARNING_STEP_MINUTES: i64 = 10;

/// Result record handed back to the caller for persistence and display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub previous_state: CardState,
    pub new_state: CardState,
    pub next_due: Timestamp,
    /// Scheduled interval in fractional days (sub-day for short steps).
    pub interval_days: f64,
    pub stability: f64,
    pub difficulty: f64,
    pub reps: u32,
    pub lapses: u32,
}

/// Per-rating scheduling preview for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchedulingPreview {
    pub again: PreviewEntry,
    pub hard: PreviewEntry,
    pub good: PreviewEntry,
    pub easy: PreviewEntry,
}

/// One entry of a scheduling preview.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreviewEntry {
    pub due: Timestamp,
    pub interval_days: f64,
}

/// Applies a rating to a card's memory state.
///
/// Pure function of its inputs: the clock reading and the random
/// source (consulted only when fuzz applies) are injected. Returns the
/// next state and a result record; persistence is the caller's job.
pub fn review(
    current: &CardMemoryState,
    rating: ReviewRating,
    config: &SchedulerConfig,
    now: Timestamp,
    rng: &mut dyn RandomSource,
) -> (CardMemoryState, ReviewOutcome) {
    let previous_state = current.state;
    let elapsed = current.elapsed_days(now);
    let retrievability = if previous_state.is_new() || current.stability <= 0.0 {
        1.0
    } else {
        fsrs::retrievability(elapsed, current.stability)
    };

    let (stability, difficulty) = if previous_state.is_new() {
        (fsrs::initial_stability(rating), fsrs::initial_difficulty(rating))
    } else if rating.is_again() {
        (
            fsrs::next_stability_on_lapse(current.stability, current.difficulty, retrievability),
            fsrs::next_difficulty(current.difficulty, rating),
        )
    } else {
        (
            fsrs::next_stability_on_success(
                current.stability,
                current.difficulty,
                retrievability,
                rating,
            ),
            fsrs::next_difficulty(current.difficulty, rating),
        )
    };

    let new_state = transition(previous_state, rating);
    let lapsed = rating.is_again()
        && matches!(previous_state, CardState::Review | CardState::Relearning);

    let interval_days = match new_state {
        CardState::Learning | CardState::Relearning => {
            short_step_days(previous_state, rating, config)
        }
        CardState::Review => review_interval_days(stability, config, rng),
        // transition never yields New
        CardState::New => review_interval_days(stability, config, rng),
    };

    let next = CardMemoryState {
        due: now.plus_days_f64(interval_days),
        stability,
        difficulty,
        reps: current.reps + u32::from(rating.is_success()),
        lapses: current.lapses + u32::from(lapsed),
        state: new_state,
        last_review: Some(now),
    };

    let outcome = ReviewOutcome {
        previous_state,
        new_state,
        next_due: next.due,
        interval_days,
        stability,
        difficulty,
        reps: next.reps,
        lapses: next.lapses,
    };

    (next, outcome)
}

/// Computes the scheduling outcome of every rating without persisting.
///
/// Fuzz is suppressed so the four displayed intervals are stable.
pub fn preview(
    current: &CardMemoryState,
    config: &SchedulerConfig,
    now: Timestamp,
) -> SchedulingPreview {
    let entry = |rating| {
        let (state, _) = review(current, rating, config, now, &mut MidpointSource);
        PreviewEntry {
            due: state.due,
            interval_days: state.due.days_since(&now),
        }
    };
    SchedulingPreview {
        again: entry(ReviewRating::Again),
        hard: entry(ReviewRating::Hard),
        good: entry(ReviewRating::Good),
        easy: entry(ReviewRating::Easy),
    }
}

/// State machine transitions.
///
/// - New goes to Learning, or straight to Review on Easy.
/// - Learning/Relearning graduate to Review on any success.
/// - Review lapses to Relearning on Again.
fn transition(state: CardState, rating: ReviewRating) -> CardState {
    match (state, rating) {
        (CardState::New, ReviewRating::Easy) => CardState::Review,
        (CardState::New, _) => CardState::Learning,
        (CardState::Learning, r) if r.is_success() => CardState::Review,
        (CardState::Learning, _) => CardState::Learning,
        (CardState::Review, ReviewRating::Again) => CardState::Relearning,
        (CardState::Review, _) => CardState::Review,
        (CardState::Relearning, r) if r.is_success() => CardState::Review,
        (CardState::Relearning, _) => CardState::Relearning,
    }
}

/// Sub-day step for cards in the learning phase.
///
/// When short-term scheduling is disabled for the tier, every step is
/// stretched to a full day instead.
fn short_step_days(previous: CardState, rating: ReviewRating, config: &SchedulerConfig) -> f64 {
    if !config.enable_short_term {
        return 1.0;
    }
    let minutes = match (previous, rating) {
        (CardState::Review | CardState::Relearning, ReviewRating::Again) => {
            RELEARNING_STEP_MINUTES
        }
        (_, ReviewRating::Again) => LEARNING_STEP_AGAIN_MINUTES,
        (_, ReviewRating::Hard) => LEARNING_STEP_HARD_MINUTES,
        _ => LEARNING_STEP_GOOD_MINUTES,
    };
    minutes as f64 / 1_440.0
}

/// Whole-day interval for a Review-state card, fuzzed and clipped.
fn review_interval_days(
    stability: f64,
    config: &SchedulerConfig,
    rng: &mut dyn RandomSource,
) -> f64 {
    let max = config.maximum_interval_days as f64;
    let mut days = fsrs::interval_for_retention(stability, config.target_retention).clamp(1.0, max);
    if config.enable_fuzz {
        days = fuzz_interval(days, rng).clamp(1.0, max);
    }
    days.round().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SchedulerConfig {
        SchedulerConfig {
            target_retention: 0.9,
            maximum_interval_days: 180,
            enable_fuzz: false,
            enable_short_term: true,
        }
    }

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000)
    }

    fn review_card(stability: f64, difficulty: f64) -> CardMemoryState {
        CardMemoryState {
            due: now(),
            stability,
            difficulty,
            reps: 4,
            lapses: 0,
            state: CardState::Review,
            last_review: Some(now().minus_days(10)),
        }
    }

    #[test]
    fn first_review_leaves_new_state() {
        let card = CardMemoryState::new_card(now());
        for rating in ReviewRating::ALL {
            let (next, outcome) = review(&card, rating, &config(), now(), &mut MidpointSource);
            assert_eq!(outcome.previous_state, CardState::New);
            assert_ne!(next.state, CardState::New);
        }
    }

    #[test]
    fn first_review_easy_graduates_immediately() {
        let card = CardMemoryState::new_card(now());
        let (next, _) = review(&card, ReviewRating::Easy, &config(), now(), &mut MidpointSource);
        assert_eq!(next.state, CardState::Review);
        assert!(next.due.days_since(&now()) >= 1.0);
    }

    #[test]
    fn first_review_good_enters_learning_with_short_step() {
        let card = CardMemoryState::new_card(now());
        let (next, outcome) = review(&card, ReviewRating::Good, &config(), now(), &mut MidpointSource);
        assert_eq!(next.state, CardState::Learning);
        assert!(outcome.interval_days < 1.0);
        assert_eq!(next.reps, 1);
        assert_eq!(next.lapses, 0);
    }

    #[test]
    fn learning_card_graduates_on_success() {
        let card = CardMemoryState {
            state: CardState::Learning,
            stability: 1.0,
            difficulty: 5.0,
            reps: 1,
            last_review: Some(now().plus_minutes(-30)),
            ..CardMemoryState::new_card(now())
        };
        let (next, _) = review(&card, ReviewRating::Good, &config(), now(), &mut MidpointSource);
        assert_eq!(next.state, CardState::Review);
    }

    #[test]
    fn learning_again_does_not_count_as_lapse() {
        let card = CardMemoryState {
            state: CardState::Learning,
            stability: 1.0,
            difficulty: 5.0,
            reps: 1,
            last_review: Some(now().plus_minutes(-30)),
            ..CardMemoryState::new_card(now())
        };
        let (next, _) = review(&card, ReviewRating::Again, &config(), now(), &mut MidpointSource);
        assert_eq!(next.state, CardState::Learning);
        assert_eq!(next.lapses, 0);
    }

    #[test]
    fn review_again_lapses_to_relearning_within_hours() {
        let card = review_card(10.0, 5.0);
        let (next, outcome) = review(&card, ReviewRating::Again, &config(), now(), &mut MidpointSource);

        assert_eq!(next.state, CardState::Relearning);
        assert_eq!(next.lapses, card.lapses + 1);
        assert!(next.stability < card.stability);
        assert!(next.stability > 0.0);
        assert!(outcome.next_due.days_since(&now()) < 1.0);
    }

    #[test]
    fn relearning_again_increments_lapses_again() {
        let card = CardMemoryState {
            state: CardState::Relearning,
            lapses: 2,
            ..review_card(3.0, 6.0)
        };
        let (next, _) = review(&card, ReviewRating::Again, &config(), now(), &mut MidpointSource);
        assert_eq!(next.lapses, 3);
        assert_eq!(next.state, CardState::Relearning);
    }

    #[test]
    fn relearning_success_returns_to_review() {
        let card = CardMemoryState {
            state: CardState::Relearning,
            lapses: 1,
            ..review_card(2.0, 6.0)
        };
        let (next, _) = review(&card, ReviewRating::Good, &config(), now(), &mut MidpointSource);
        assert_eq!(next.state, CardState::Review);
        assert_eq!(next.lapses, 1);
    }

    #[test]
    fn review_success_extends_interval() {
        let card = review_card(10.0, 5.0);
        let (next, outcome) = review(&card, ReviewRating::Good, &config(), now(), &mut MidpointSource);

        assert_eq!(next.state, CardState::Review);
        assert!(next.stability > card.stability);
        assert!(outcome.interval_days >= 1.0);
        assert!(outcome.interval_days <= 180.0);
    }

    #[test]
    fn interval_respects_tier_maximum() {
        let tight = SchedulerConfig {
            maximum_interval_days: 5,
            ..config()
        };
        let card = review_card(200.0, 2.0);
        let (_, outcome) = review(&card, ReviewRating::Easy, &tight, now(), &mut MidpointSource);
        assert!(outcome.interval_days <= 5.0);
    }

    #[test]
    fn short_term_disabled_stretches_steps_to_a_day() {
        let no_short = SchedulerConfig {
            enable_short_term: false,
            ..config()
        };
        let card = CardMemoryState::new_card(now());
        let (next, outcome) = review(&card, ReviewRating::Again, &no_short, now(), &mut MidpointSource);
        assert_eq!(next.state, CardState::Learning);
        assert_eq!(outcome.interval_days, 1.0);
    }

    #[test]
    fn failed_first_review_does_not_count_a_rep() {
        let card = CardMemoryState::new_card(now());
        let (next, _) = review(&card, ReviewRating::Again, &config(), now(), &mut MidpointSource);
        assert_eq!(next.reps, 0);
        assert_eq!(next.lapses, 0);
    }

    #[test]
    fn last_review_is_set_to_now() {
        let card = CardMemoryState::new_card(now());
        let (next, _) = review(&card, ReviewRating::Good, &config(), now(), &mut MidpointSource);
        assert_eq!(next.last_review, Some(now()));
    }

    #[test]
    fn preview_covers_all_ratings_without_mutating() {
        let card = review_card(10.0, 5.0);
        let preview = preview(&card, &config(), now());

        assert!(preview.again.interval_days < 1.0);
        assert!(preview.hard.interval_days >= 1.0);
        assert!(preview.hard.interval_days <= preview.good.interval_days);
        assert!(preview.good.interval_days <= preview.easy.interval_days);
        // Original state untouched
        assert_eq!(card.state, CardState::Review);
    }

    #[test]
    fn preview_is_deterministic_even_with_fuzz_enabled() {
        let fuzzed = SchedulerConfig {
            enable_fuzz: true,
            ..config()
        };
        let card = review_card(25.0, 4.0);
        let p1 = preview(&card, &fuzzed, now());
        let p2 = preview(&card, &fuzzed, now());
        assert_eq!(p1, p2);
    }
}
