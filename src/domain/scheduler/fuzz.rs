//! Injected random source for interval fuzz.

/// Source of uniform random values in `[0, 1)`.
///
/// Injected so interval computation stays deterministic and
/// reproducible in tests. Production adapters wrap `rand`.
pub trait RandomSource: Send {
    /// Returns the next uniform value in `[0, 1)`.
    fn unit(&mut self) -> f64;
}

/// Random source that always returns the midpoint.
///
/// Yields a zero fuzz offset; used by scheduling previews so the four
/// displayed intervals are stable across calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct MidpointSource;

impl RandomSource for MidpointSource {
    fn unit(&mut self) -> f64 {
        0.5
    }
}

/// Minimum interval, in days, before fuzz is applied.
const FUZZ_MIN_INTERVAL_DAYS: f64 = 2.5;

/// Fuzz fraction applied to the interval.
const FUZZ_FRACTION: f64 = 0.05;

/// Perturbs an interval by a bounded random offset.
///
/// The offset is at most 5% of the interval and at least one day, so
/// neighbouring cards reviewed together drift apart. Intervals shorter
/// than 2.5 days are returned unchanged.
pub fn fuzz_interval(interval_days: f64, rng: &mut dyn RandomSource) -> f64 {
    if interval_days < FUZZ_MIN_INTERVAL_DAYS {
        return interval_days;
    }
    let span = (interval_days * FUZZ_FRACTION).max(1.0);
    let offset = (2.0 * rng.unit() - 1.0) * span;
    (interval_days + offset).max(1.0)
}
