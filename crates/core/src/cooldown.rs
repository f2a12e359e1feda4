//! Claim cooldown policy.
//!
//! A user may claim once, then must wait `window_secs` before the next
//! successful claim. A stamp of `0` means the user never claimed and is
//! always eligible.

use crate::error::CoreError;
use crate::types::UnixSeconds;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default time between successful claims (30 minutes).
pub const DEFAULT_COOLDOWN_SECS: i64 = 1800;

/// Upper bound accepted from configuration (one week).
pub const MAX_COOLDOWN_SECS: i64 = 7 * 24 * 3600;

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Result of checking a user's cooldown stamp against the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownStatus {
    Ready,
    Cooling { remaining_secs: i64 },
}

impl CooldownStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, CooldownStatus::Ready)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownPolicy {
    window_secs: i64,
}

impl Default for CooldownPolicy {
    fn default() -> Self {
        Self {
            window_secs: DEFAULT_COOLDOWN_SECS,
        }
    }
}

impl CooldownPolicy {
    /// Build a policy with a custom window.
    ///
    /// A window of `0` disables the cooldown entirely.
    pub fn new(window_secs: i64) -> Result<Self, CoreError> {
        if !(0..=MAX_COOLDOWN_SECS).contains(&window_secs) {
            return Err(CoreError::Validation(format!(
                "Cooldown must be between 0 and {MAX_COOLDOWN_SECS} seconds, got {window_secs}"
            )));
        }
        Ok(Self { window_secs })
    }

    pub fn window_secs(&self) -> i64 {
        self.window_secs
    }

    /// Decide whether a user whose last claim was stamped `last_claim_at` may
    /// claim at `now`.
    ///
    /// If the clock is behind the stamp the user keeps waiting until the
    /// clock passes `last_claim_at + window`.
    pub fn check(&self, last_claim_at: UnixSeconds, now: UnixSeconds) -> CooldownStatus {
        if last_claim_at == 0 {
            return CooldownStatus::Ready;
        }
        let elapsed = now.saturating_sub(last_claim_at);
        if elapsed < self.window_secs {
            CooldownStatus::Cooling {
                remaining_secs: self.window_secs.saturating_sub(elapsed),
            }
        } else {
            CooldownStatus::Ready
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
