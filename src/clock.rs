use std::time::{SystemTime, UNIX_EPOCH};

/// A source of the current time in seconds.
///
/// The sidepass rule never sleeps; it only compares timestamps taken from
/// this clock, so any monotonically non-decreasing source will do.
pub trait Clock {
    /// The current time in seconds.
    fn now_in_seconds(&self) -> f64;
}

/// A [Clock] backed by the system wall clock.
#[derive(Clone, Copy, Default, Debug)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_in_seconds(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }
}
