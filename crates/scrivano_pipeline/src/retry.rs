//! Retry policy for speech-synthesis calls.

use scrivano_error::{CollaboratorError, TransientError};
use std::time::Duration;

/// Default transient-failure markers matched against error messages.
const DEFAULT_MARKERS: [&str; 4] = ["overloaded", "rate limit", "503", "service unavailable"];

/// Bounded retry policy with exponential backoff.
///
/// Transience is judged by substring match against the marker list, compared
/// case-insensitively. The markers are configuration: providers change their
/// error strings, and operators can extend the list without a code change.
///
/// # Examples
///
/// ```
/// use scrivano_pipeline::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts(), 3);
/// assert_eq!(policy.delay_for(1), Duration::from_secs(2));
/// assert_eq!(policy.delay_for(2), Duration::from_secs(4));
/// ```
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    markers: Vec<String>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            markers: DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl RetryPolicy {
    /// Build a policy with explicit bounds and markers.
    pub fn new(max_attempts: u32, base_delay: Duration, markers: Vec<String>) -> Self {
        Self {
            max_attempts,
            base_delay,
            markers,
        }
    }

    /// Maximum number of attempts, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// The transient-failure markers in effect.
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Whether the error is worth retrying.
    pub fn is_transient(&self, error: &CollaboratorError) -> bool {
        error.matches_markers(&self.markers)
    }

    /// Backoff before the attempt after `attempt` (1-based): 2^attempt times
    /// the base delay, so 2s, 4s, 8s with the default base.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrivano_error::CollaboratorErrorKind;

    fn error(message: &str) -> CollaboratorError {
        CollaboratorError::new(CollaboratorErrorKind::ApiRequest(message.to_string()))
    }

    #[test]
    fn test_default_markers_classify_transience() {
        let policy = RetryPolicy::default();
        assert!(policy.is_transient(&error("The model is OVERLOADED right now")));
        assert!(policy.is_transient(&error("hit the rate limit")));
        assert!(policy.is_transient(&error("got 503 from upstream")));
        assert!(policy.is_transient(&error("Service Unavailable")));
        assert!(!policy.is_transient(&error("invalid argument")));
    }

    #[test]
    fn test_backoff_doubles_per_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
        assert_eq!(policy.delay_for(3), Duration::from_secs(8));
    }

    #[test]
    fn test_custom_markers() {
        let policy = RetryPolicy::new(
            5,
            Duration::from_millis(10),
            vec!["quota".to_string()],
        );
        assert!(policy.is_transient(&error("Quota exceeded")));
        assert!(!policy.is_transient(&error("overloaded")));
        assert_eq!(policy.max_attempts(), 5);
    }
}
