//! Run limits for the iterative strategies.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Optional deadline and cancellation flag checked between iterations.
///
/// The default quota never triggers, so a run stops only on its own
/// termination rule (generation count or temperature floor).
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use u_collect::optimize::Quota;
///
/// let flag = Arc::new(AtomicBool::new(false));
/// let quota = Quota::default().with_cancel_flag(flag.clone());
/// assert!(!quota.is_reached());
/// flag.store(true, Ordering::Relaxed);
/// assert!(quota.is_reached());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Quota {
    deadline: Option<Instant>,
    cancelled: Option<Arc<AtomicBool>>,
}

impl Quota {
    /// Stops the run once `deadline` has passed.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Stops the run once `limit` has elapsed from now.
    pub fn with_time_limit(self, limit: Duration) -> Self {
        self.with_deadline(Instant::now() + limit)
    }

    /// Stops the run once `flag` is set by another thread.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancelled = Some(flag);
        self
    }

    /// Returns `true` if the run should stop now.
    pub fn is_reached(&self) -> bool {
        self.cancelled
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_never_reached() {
        assert!(!Quota::default().is_reached());
    }

    #[test]
    fn test_past_deadline_reached() {
        let quota = Quota::default().with_time_limit(Duration::ZERO);
        assert!(quota.is_reached());
    }

    #[test]
    fn test_future_deadline_not_reached() {
        let quota = Quota::default().with_time_limit(Duration::from_secs(3600));
        assert!(!quota.is_reached());
    }
}
