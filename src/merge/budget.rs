//! Deadlines, pass limits and cancellation for a minimization run
//!
//! A [`Budget`] is checked at the start of every pass. When it is exhausted
//! the merger stops and hands back its current term list, labelled as a
//! partial result through [`Completion::Partial`](super::Completion).

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared flag used to cancel a run from another thread
///
/// # Examples
///
/// ```
/// use cube_merge::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// assert!(!token.is_cancelled());
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; takes effect at the start of the next pass
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Why a run stopped before reaching a fixed point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interruption {
    /// The deadline passed
    DeadlineExpired,
    /// The configured number of passes ran
    PassLimitReached,
    /// A [`CancelToken`] was triggered
    Cancelled,
}

impl fmt::Display for Interruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interruption::DeadlineExpired => write!(f, "deadline expired"),
            Interruption::PassLimitReached => write!(f, "pass limit reached"),
            Interruption::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Limits on a single minimization run
///
/// The default budget is unlimited.
#[derive(Debug, Clone, Default)]
pub struct Budget {
    deadline: Option<Instant>,
    max_passes: Option<usize>,
    cancel: Option<CancelToken>,
}

impl Budget {
    /// No deadline, no pass limit, no cancellation
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Stop once `timeout` has elapsed from now
    ///
    /// A timeout too large to represent as an [`Instant`] sets no deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout);
        self
    }

    /// Stop once `deadline` has passed
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Run at most `max_passes` passes
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = Some(max_passes);
        self
    }

    /// Stop when `token` is cancelled
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn max_passes(&self) -> Option<usize> {
        self.max_passes
    }

    /// Check the budget before starting pass number `passes_done + 1`
    pub(crate) fn check(&self, passes_done: usize) -> Option<Interruption> {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Some(Interruption::Cancelled);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Some(Interruption::DeadlineExpired);
        }
        if self.max_passes.is_some_and(|max| passes_done >= max) {
            return Some(Interruption::PassLimitReached);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_never_interrupts() {
        let budget = Budget::unlimited();
        assert_eq!(budget.check(0), None);
        assert_eq!(budget.check(1_000_000), None);
    }

    #[test]
    fn test_pass_limit() {
        let budget = Budget::unlimited().with_max_passes(2);
        assert_eq!(budget.check(1), None);
        assert_eq!(budget.check(2), Some(Interruption::PassLimitReached));
    }

    #[test]
    fn test_expired_deadline() {
        let budget = Budget::unlimited().with_deadline(Instant::now());
        assert_eq!(budget.check(0), Some(Interruption::DeadlineExpired));
    }

    #[test]
    fn test_unrepresentable_timeout_sets_no_deadline() {
        let budget = Budget::unlimited().with_timeout(Duration::from_secs(u64::MAX));
        assert_eq!(budget.deadline(), None);
        assert_eq!(budget.check(0), None);

        let budget = Budget::unlimited().with_timeout(Duration::from_secs(60));
        assert!(budget.deadline().is_some());
        assert_eq!(budget.check(0), None);
    }

    #[test]
    fn test_cancel_takes_priority() {
        let token = CancelToken::new();
        let budget = Budget::unlimited()
            .with_max_passes(0)
            .with_cancel_token(token.clone());
        assert_eq!(budget.check(0), Some(Interruption::PassLimitReached));
        token.cancel();
        assert_eq!(budget.check(0), Some(Interruption::Cancelled));
    }
}
