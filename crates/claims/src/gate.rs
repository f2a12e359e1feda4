//! The store's single serialization point.
//!
//! Every mutating store call takes a `&WriteGuard` so it can only run while
//! the caller holds the gate. The claim engine holds one guard across the
//! whole check-then-commit sequence, which is what makes a claim atomic with
//! respect to every other writer.

use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};

use crate::error::ClaimError;

/// Default bound on how long a writer waits for the gate.
pub const DEFAULT_GATE_TIMEOUT: Duration = Duration::from_secs(5);

/// Process-wide mutual exclusion for writers, with a bounded wait.
#[derive(Debug)]
pub struct WriteGate {
    lock: Mutex<()>,
    timeout: Duration,
}

/// Proof that the holder owns the [`WriteGate`]. Released on drop.
#[derive(Debug)]
pub struct WriteGuard<'a> {
    _guard: MutexGuard<'a, ()>,
}

impl Default for WriteGate {
    fn default() -> Self {
        Self::new(DEFAULT_GATE_TIMEOUT)
    }
}

impl WriteGate {
    pub fn new(timeout: Duration) -> Self {
        Self {
            lock: Mutex::new(()),
            timeout,
        }
    }

    /// Wait for the gate, giving up with [`ClaimError::Busy`] after the
    /// configured timeout.
    pub async fn enter(&self) -> Result<WriteGuard<'_>, ClaimError> {
        match tokio::time::timeout(self.timeout, self.lock.lock()).await {
            Ok(guard) => Ok(WriteGuard { _guard: guard }),
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Write gate wait timed out",
                );
                Err(ClaimError::Busy {
                    waited: self.timeout,
                })
            }
        }
    }
}
