//! Role-gated status transition rules.
//!
//! The transition table lives here as pure lookup functions, so every call
//! site shares one authoritative rule set instead of ad hoc status checks.
//!
//! - No IO
//! - No panics
//! - No free-form status assignment

use thiserror::Error;

use crate::role::ActorRole;
use crate::status::OrderStatus;

/// Why a requested status change was refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// The `(current, role, target)` combination is not in the table.
    #[error("{role} may not move an order from {from} to {to}")]
    Illegal {
        from: OrderStatus,
        to: OrderStatus,
        role: ActorRole,
    },

    /// The role has no forward successor from the current status.
    #[error("{role} has no forward step from {from}")]
    NoForwardStep { from: OrderStatus, role: ActorRole },

    /// Terminal statuses are absorbing.
    #[error("order is already {0} and can no longer change")]
    Terminal(OrderStatus),

    /// Optimistic-concurrency conflict: the persisted status moved
    /// underneath the caller, who must re-fetch and retry.
    #[error("stale status: expected {expected}, order is now {actual}")]
    Stale {
        expected: OrderStatus,
        actual: OrderStatus,
    },
}

/// The single legal forward successor for a role, if any.
///
/// Forward progress never skips an intermediate status: a vendor cannot jump
/// from `Pending` straight to `Ready`.
pub fn forward_step(status: OrderStatus, role: ActorRole) -> Option<OrderStatus> {
    use OrderStatus::*;

    match role {
        ActorRole::Vendor => match status {
            Pending => Some(Accepted),
            Accepted => Some(Preparing),
            Preparing => Some(Ready),
            _ => None,
        },
        ActorRole::Courier => match status {
            Ready => Some(Dispatched),
            Dispatched => Some(Delivered),
            _ => None,
        },
        ActorRole::Customer => None,
    }
}

/// Whether the role may still cancel an order in this status.
///
/// The cancellation window closes once preparation is complete.
pub fn may_cancel(status: OrderStatus, role: ActorRole) -> bool {
    use OrderStatus::*;

    matches!(role, ActorRole::Customer | ActorRole::Vendor)
        && matches!(status, Pending | Accepted | Preparing)
}

/// Validate a requested transition against the table.
///
/// Returns `Ok(())` exactly when the change may be applied; any error leaves
/// the caller's state untouched by construction.
pub fn validate_transition(
    current: OrderStatus,
    role: ActorRole,
    target: OrderStatus,
) -> Result<(), TransitionError> {
    if current.is_terminal() {
        return Err(TransitionError::Terminal(current));
    }

    if target == OrderStatus::Cancelled {
        if may_cancel(current, role) {
            return Ok(());
        }
        return Err(TransitionError::Illegal {
            from: current,
            to: target,
            role,
        });
    }

    if forward_step(current, role) == Some(target) {
        return Ok(());
    }

    Err(TransitionError::Illegal {
        from: current,
        to: target,
        role,
    })
}
