//! Rate-limits progress redraws so a fast phase does not flood the console.

use std::time::{Duration, Instant};

/// Rate-limiter for progress updates within one phase.
///
/// The first update and the update that completes the phase always pass.
#[derive(Debug, Clone)]
pub struct ProgressThrottle {
    last_emit: Option<Instant>,
    min_interval: Duration,
}

impl ProgressThrottle {
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            last_emit: None,
            min_interval,
        }
    }

    /// Throttle with a 100ms interval.
    pub const fn default_interval() -> Self {
        Self::new(Duration::from_millis(100))
    }

    /// Whether the update `finished / total` should be shown.
    pub fn should_emit(&mut self, finished: u64, total: u64) -> bool {
        let now = Instant::now();
        let is_final = finished >= total;
        match self.last_emit {
            Some(last) if !is_final && now.duration_since(last) < self.min_interval => false,
            _ => {
                self.last_emit = Some(now);
                true
            }
        }
    }

    /// Start a new phase; the next update passes.
    pub const fn reset(&mut self) {
        self.last_emit = None;
    }
}

impl Default for ProgressThrottle {
    fn default() -> Self {
        Self::default_interval()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_update_passes() {
        let mut throttle = ProgressThrottle::new(Duration::from_secs(60));
        assert!(throttle.should_emit(1, 10));
    }

    #[test]
    fn test_respects_interval() {
        let mut throttle = ProgressThrottle::new(Duration::from_millis(50));
        assert!(throttle.should_emit(1, 10));
        assert!(!throttle.should_emit(2, 10));

        std::thread::sleep(Duration::from_millis(60));
        assert!(throttle.should_emit(3, 10));
    }

    #[test]
    fn test_final_update_always_passes() {
        let mut throttle = ProgressThrottle::new(Duration::from_secs(60));
        assert!(throttle.should_emit(9, 10));
        assert!(throttle.should_emit(10, 10));
    }

    #[test]
    fn test_reset() {
        let mut throttle = ProgressThrottle::new(Duration::from_secs(60));
        throttle.should_emit(1, 10);
        assert!(!throttle.should_emit(2, 10));

        throttle.reset();
        assert!(throttle.should_emit(3, 10));
    }
}
