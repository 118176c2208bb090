//! The checkout confirmation state machine.
//!
//! ```text
//! Idle -> ConfirmPending -> Idle          (cancel)
//!                        -> SuccessShown  (confirm, cart is cleared by caller)
//! SuccessShown -> Idle                    (auto-dismiss after SUCCESS_DISMISS)
//! ```
//!
//! Checkout never contacts a remote system; confirming is a local
//! transition whose only side effect is the cart reset performed by the
//! caller. Transition methods are total: called in the wrong state they
//! mutate nothing and return `false`, so a replayed or double-clicked
//! form post degrades to a no-op.

use std::time::{Duration, Instant};

/// How long the success acknowledgment stays visible.
pub const SUCCESS_DISMISS: Duration = Duration::from_secs(2);

/// Where one cart session is in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutFlow {
    /// No checkout in progress.
    #[default]
    Idle,
    /// The confirmation prompt is showing. `total` is the cart's total
    /// quantity snapshotted when the prompt was opened.
    ConfirmPending { total: u32 },
    /// The success acknowledgment is showing until the deadline passes.
    SuccessShown { until: Instant },
}

impl CheckoutFlow {
    /// Open the confirmation prompt with the given total quantity.
    ///
    /// Only valid from `Idle`; returns whether the transition happened.
    pub fn begin(&mut self, total: u32) -> bool {
        if matches!(self, Self::Idle) {
            *self = Self::ConfirmPending { total };
            true
        } else {
            false
        }
    }

    /// Dismiss the confirmation prompt without ordering anything.
    pub fn cancel(&mut self) -> bool {
        if matches!(self, Self::ConfirmPending { .. }) {
            *self = Self::Idle;
            true
        } else {
            false
        }
    }

    /// Confirm the order: move to `SuccessShown` with an auto-dismiss
    /// deadline of `now + SUCCESS_DISMISS`.
    ///
    /// The caller owns the accompanying cart reset.
    pub fn confirm(&mut self, now: Instant) -> bool {
        if matches!(self, Self::ConfirmPending { .. }) {
            *self = Self::SuccessShown {
                until: now + SUCCESS_DISMISS,
            };
            true
        } else {
            false
        }
    }

    /// Dismiss an expired success acknowledgment.
    ///
    /// Called both by the deferred dismiss task and opportunistically on
    /// render, so a lost task cannot leave the success state dangling.
    /// Returns whether the flow transitioned back to `Idle`.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Self::SuccessShown { until } = self {
            if now >= *until {
                *self = Self::Idle;
                return true;
            }
        }
        false
    }

    /// The total quantity shown on the confirmation prompt, if pending.
    #[must_use]
    pub const fn pending_total(&self) -> Option<u32> {
        match self {
            Self::ConfirmPending { total } => Some(*total),
            _ => None,
        }
    }
}
