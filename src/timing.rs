//! Timing primitives.
//!
//! Every measurement in the crate follows the same shape: some untimed setup,
//! then a single region bracketed by [`timed`], repeated a fixed number of
//! times and averaged by [`mean`].

use std::{hint::black_box, time::Duration, time::Instant};

/// Run `f`, returning how long it took together with its result.
///
/// The result is passed through [`black_box`] so that the timed work cannot be
/// optimised away.
#[inline]
pub fn timed<T>(f: impl FnOnce() -> T) -> (Duration, T) {
    let start = Instant::now();
    let out = black_box(f());
    (start.elapsed(), out)
}

/// Run `trial` `repetitions` times and return the mean of the durations it
/// reports.
///
/// Each trial is responsible for its own setup and should only report the
/// duration of the region it wants measured (usually via [`timed`]). The mean
/// is truncated to whole nanoseconds, and is zero when `repetitions` is zero.
#[inline]
pub fn mean(repetitions: usize, mut trial: impl FnMut() -> Duration) -> Duration {
    let mut total = Duration::ZERO;
    for _ in 0..repetitions {
        total = total.saturating_add(trial());
    }
    #[expect(clippy::as_conversions, reason = "usize always fits in u128")]
    let nanos = total
        .as_nanos()
        .checked_div(repetitions as u128)
        .unwrap_or_default();
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}
