//! Role-gated transition actions.
//!
//! Every status change funnels through here with an explicit [`ActorRole`].
//! The transition table is consulted locally *before* any network call, so
//! illegal requests are refused synchronously and never reach the backend;
//! the expected source status is then plumbed into `update_status` so racing
//! writers surface as [`TransitionError::Stale`].

use bazaar_orders::{
    ActorRole, Order, OrderStatus, TransitionError, forward_step, validate_transition,
};

use crate::backend::OrderBackend;
use crate::error::BackendError;

/// Order transition entry point for presentation layers.
#[derive(Debug)]
pub struct OrderActions<B> {
    backend: B,
}

impl<B: OrderBackend> OrderActions<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Advance an order along the role's forward path.
    pub async fn advance(&self, order: &Order, role: ActorRole) -> Result<Order, BackendError> {
        if order.status.is_terminal() {
            return Err(TransitionError::Terminal(order.status).into());
        }

        let target = forward_step(order.status, role).ok_or(TransitionError::NoForwardStep {
            from: order.status,
            role,
        })?;

        self.transition(order, role, target).await
    }

    /// Request an explicit status change.
    pub async fn transition(
        &self,
        order: &Order,
        role: ActorRole,
        target: OrderStatus,
    ) -> Result<Order, BackendError> {
        validate_transition(order.status, role, target)?;

        self.backend.update_status(order.id, order.status, target).await
    }

    /// Cancel an order within the role's cancellation window.
    pub async fn cancel(
        &self,
        order: &Order,
        role: ActorRole,
        reason: &str,
    ) -> Result<Order, BackendError> {
        validate_transition(order.status, role, OrderStatus::Cancelled)?;

        tracing::debug!(order_id = %order.id, %role, reason, "cancelling order");
        self.backend.cancel(order.id, reason).await
    }
}
