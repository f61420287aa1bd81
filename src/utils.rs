//! Small shared utilities.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in milliseconds since the Unix epoch.
///
/// The engine itself never reads the clock (command timestamps are
/// caller-assigned), but tests, benches and demo drivers use this to stamp
/// their commands.
#[must_use]
pub fn current_time_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_monotonic_enough() {
        let a = current_time_millis();
        let b = current_time_millis();
        assert!(b >= a);
        assert!(a > 1_600_000_000_000);
    }
}
