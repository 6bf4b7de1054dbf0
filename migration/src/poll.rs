use std::{future::Future, time::Duration};

use rand::Rng;

use crate::error::Error;

/// Bounded exponential backoff with jitter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollPolicy {
    /// Number of checks before giving up.
    pub attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    /// Upper bound of the random delay added to every wait.
    pub jitter: Duration,
}

impl PollPolicy {
    pub const fn new(attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            attempts,
            base_delay,
            max_delay,
            jitter: Duration::from_millis(250),
        }
    }

    pub const fn with_jitter(self, jitter: Duration) -> Self {
        Self { jitter, ..self }
    }

    /// Wait before the check following `attempt` (zero based).
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.min(16));
        let backoff = self.base_delay.saturating_mul(factor).min(self.max_delay);
        let jitter_ms = self.jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return backoff;
        }
        backoff + Duration::from_millis(rand::thread_rng().gen_range(0..=jitter_ms))
    }
}

/// Runs `check` until it yields a value or the policy is exhausted.
///
/// Errors returned by `check` abort polling immediately. `Ok(None)` means the
/// condition never held.
pub async fn until<T, F, Fut>(
    policy: &PollPolicy,
    condition: &str,
    mut check: F,
) -> Result<Option<T>, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, Error>>,
{
    for attempt in 0..policy.attempts {
        if let Some(value) = check().await? {
            return Ok(Some(value));
        }
        if attempt + 1 < policy.attempts {
            let delay = policy.delay(attempt);
            log::debug!(
                "{}: not yet ({}/{}), retrying in {:?}",
                condition,
                attempt + 1,
                policy.attempts,
                delay
            );
            tokio::time::sleep(delay).await;
        }
    }
    log::warn!("{}: gave up after {} attempts", condition, policy.attempts);
    Ok(None)
}
