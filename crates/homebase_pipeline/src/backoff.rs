//! Delay between attempts, chosen by failure class.

use derive_getters::Getters;
use homebase_config::RetrySettings;
use homebase_core::FailureKind;
use std::time::Duration;

/// Maps a failure classification to the wait before the next attempt.
///
/// # Examples
///
/// ```
/// use homebase_core::FailureKind;
/// use homebase_pipeline::BackoffPolicy;
/// use std::time::Duration;
///
/// let policy = BackoffPolicy::default();
/// assert_eq!(policy.delay_for(FailureKind::DeadlineExceeded), Some(Duration::from_secs(1)));
/// assert_eq!(policy.delay_for(FailureKind::ResourceExhausted), Some(Duration::from_secs(10)));
/// assert_eq!(policy.delay_for(FailureKind::Extraction), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct BackoffPolicy {
    /// Wait after deadline, content-policy and unclassified failures.
    short_delay: Duration,
    /// Wait after quota exhaustion.
    long_delay: Duration,
}

impl BackoffPolicy {
    /// Creates a policy from the two delays.
    pub fn new(short_delay: Duration, long_delay: Duration) -> Self {
        Self {
            short_delay,
            long_delay,
        }
    }

    /// Policy with both delays zero.
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Delay before retrying after `kind`, or `None` to retry at once.
    pub fn delay_for(&self, kind: FailureKind) -> Option<Duration> {
        match kind {
            FailureKind::ResourceExhausted => Some(self.long_delay),
            FailureKind::DeadlineExceeded
            | FailureKind::ContentPolicy
            | FailureKind::Unclassified => Some(self.short_delay),
            FailureKind::Extraction => None,
        }
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), Duration::from_secs(10))
    }
}

impl From<&RetrySettings> for BackoffPolicy {
    fn from(settings: &RetrySettings) -> Self {
        Self::new(settings.short_delay(), settings.long_delay())
    }
}
