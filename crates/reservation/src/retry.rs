//! Bounded, jittered backoff for registry reads.
//!
//! Only reads are retried, and only on backend failures. The version-checked
//! availability write is never retried: its failure means a lost race, not a
//! transient fault, and retrying would hand the item to the wrong caller.

use std::thread;
use std::time::Duration;

use rand::Rng;

use agrirent_registry::RegistryError;

/// Jittered exponential backoff policy.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: usize,
    base_delay_ms: u64,
    max_delay_ms: u64,
    jitter_pct: f64,
}

impl RetryPolicy {
    pub fn new(
        max_attempts: usize,
        base_delay_ms: u64,
        max_delay_ms: u64,
        jitter_pct: f64,
    ) -> Self {
        let clamped_base = base_delay_ms.max(1);
        Self {
            max_attempts: max_attempts.max(1),
            base_delay_ms: clamped_base,
            max_delay_ms: max_delay_ms.max(clamped_base),
            jitter_pct: jitter_pct.clamp(0.0, 1.0),
        }
    }

    /// Default for registry reads: 2 retries (3 attempts total).
    pub fn registry_reads() -> Self {
        Self::new(3, 50, 400, 0.25)
    }

    /// Fail on the first error. Useful in tests.
    pub fn no_retries() -> Self {
        Self::new(1, 1, 1, 0.0)
    }

    fn next_delay(&self, attempt: usize) -> Duration {
        let exp = 2_u64.saturating_pow(attempt as u32);
        let mut delay = self.base_delay_ms.saturating_mul(exp);
        if delay > self.max_delay_ms {
            delay = self.max_delay_ms;
        }
        if self.jitter_pct > 0.0 {
            let spread = (delay as f64 * self.jitter_pct) as i64;
            let delta = rand::thread_rng().gen_range(-spread..=spread);
            delay = delay.saturating_add_signed(delta);
        }
        Duration::from_millis(delay)
    }

    /// Run `op`, retrying on [`RegistryError::Backend`] until the attempt
    /// budget is spent. Every other error returns immediately.
    pub fn run<T, F>(&self, mut op: F) -> Result<T, RegistryError>
    where
        F: FnMut() -> Result<T, RegistryError>,
    {
        let mut attempt = 0;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(RegistryError::Backend(msg)) => {
                    attempt += 1;
                    if attempt >= self.max_attempts {
                        return Err(RegistryError::Backend(msg));
                    }
                    thread::sleep(self.next_delay(attempt - 1));
                }
                Err(other) => return Err(other),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::registry_reads()
    }
}
