//! Monotonic local-version clock.

use parking_lot::Mutex;

/// Process-local strictly-increasing change clock.
///
/// Every mutated record is stamped with a tick from this clock, giving a
/// total order over local changes that is independent of the causal version
/// vectors. One clock instance is owned by the [`crate::FileIndex`] and
/// shared by all folders; it starts at zero on every process start and
/// resumes above any seed value loaded from disk.
#[derive(Debug, Default)]
pub struct Clock {
    tick: Mutex<i64>,
}

impl Clock {
    /// Creates a clock starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next tick, strictly greater than both every previously
    /// issued tick and `seed`.
    ///
    /// Passing a stored record's local version as `seed` makes the clock
    /// resume monotonically above it rather than reissuing old stamps after
    /// a restart. Safe to call from any number of threads.
    pub fn advance(&self, seed: i64) -> i64 {
        let mut tick = self.tick.lock();
        if seed > *tick {
            *tick = seed + 1;
        } else {
            *tick += 1;
        }
        *tick
    }
}
