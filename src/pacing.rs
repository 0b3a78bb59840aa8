//! State shared between the controller and its search worker: the
//! cancellation flag and the per-step visualization delay.

use crate::error::{Result, SearchError};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Delay used until the caller picks a speed: 20 steps per second.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(50);

/// Cooperative cancellation flag. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Pause inserted after every `Checked`/`Path` emission, stored in
/// nanoseconds so a new speed is picked up by the very next emission.
#[derive(Debug)]
pub struct Pacing {
    delay_nanos: AtomicU64,
}

impl Pacing {
    pub fn new(delay: Duration) -> Self {
        Pacing {
            delay_nanos: AtomicU64::new(duration_to_nanos(delay)),
        }
    }

    /// `delay = 1 / speed` seconds; higher speed means a shorter pause.
    pub fn set_speed(&self, speed: f64) -> Result<()> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(SearchError::InvalidSpeed(speed));
        }
        self.set_delay(Duration::from_secs_f64(1.0 / speed));
        Ok(())
    }

    pub fn set_delay(&self, delay: Duration) {
        self.delay_nanos
            .store(duration_to_nanos(delay), Ordering::Relaxed);
    }

    pub fn delay(&self) -> Duration {
        Duration::from_nanos(self.delay_nanos.load(Ordering::Relaxed))
    }

    /// Sleep for the current delay. Not interruptible; cancellation is
    /// observed on the next step.
    pub fn pause(&self) {
        let delay = self.delay();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing::new(DEFAULT_DELAY)
    }
}

fn duration_to_nanos(delay: Duration) -> u64 {
    u64::try_from(delay.as_nanos()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_maps_to_inverse_delay() {
        let pacing = Pacing::default();
        assert_eq!(pacing.delay(), DEFAULT_DELAY);
        pacing.set_speed(4.0).unwrap();
        assert_eq!(pacing.delay(), Duration::from_millis(250));
        pacing.set_speed(1000.0).unwrap();
        assert_eq!(pacing.delay(), Duration::from_millis(1));
    }

    #[test]
    fn rejects_non_positive_and_non_finite_speed() {
        let pacing = Pacing::default();
        assert_eq!(pacing.set_speed(0.0), Err(SearchError::InvalidSpeed(0.0)));
        assert_eq!(pacing.set_speed(-3.0), Err(SearchError::InvalidSpeed(-3.0)));
        assert!(pacing.set_speed(f64::NAN).is_err());
        assert!(pacing.set_speed(f64::INFINITY).is_err());
        assert_eq!(pacing.delay(), DEFAULT_DELAY);
    }

    #[test]
    fn cancel_token_clones_share_the_flag() {
        let token = CancelToken::new();
        let worker_side = token.clone();
        assert!(!worker_side.is_cancelled());
        token.cancel();
        assert!(worker_side.is_cancelled());
        worker_side.clear();
        assert!(!token.is_cancelled());
    }
}
