use std::sync::Arc;

use async_trait::async_trait;

use bazaar_core::{OrderId, VendorId};
use bazaar_orders::{Order, OrderStatus, VendorOrderRequest};

use crate::error::BackendError;

/// The order backend the core consumes.
///
/// - **No storage assumptions**: implemented over HTTP in production and
///   in memory for tests.
/// - **Optimistic concurrency**: `update_status` carries the expected source
///   status; implementations must refuse the write when the persisted status
///   no longer matches, surfacing `TransitionError::Stale` — even when the
///   requested pair is identical to the one that already won the race.
/// - **Idempotent re-apply**: requesting a transition to the status the
///   order already has (with a matching expectation) is a no-op.
/// - **Pricing authority**: `create` assigns `price_at_order_time`; requests
///   never carry prices.
#[async_trait]
pub trait OrderBackend: Send + Sync {
    /// Create one vendor-scoped order from its share of a cart.
    async fn create(&self, request: &VendorOrderRequest) -> Result<Order, BackendError>;

    async fn get_by_id(&self, id: OrderId) -> Result<Order, BackendError>;

    /// All orders of the session's customer.
    async fn list_for_customer(&self) -> Result<Vec<Order>, BackendError>;

    /// All orders placed with one vendor.
    async fn list_for_vendor(&self, vendor_id: &VendorId) -> Result<Vec<Order>, BackendError>;

    /// Transition an order, conditional on its current persisted status.
    async fn update_status(
        &self,
        id: OrderId,
        expected: OrderStatus,
        target: OrderStatus,
    ) -> Result<Order, BackendError>;

    /// Cancel an order, recording the caller's reason.
    async fn cancel(&self, id: OrderId, reason: &str) -> Result<Order, BackendError>;
}

#[async_trait]
impl<B> OrderBackend for Arc<B>
where
    B: OrderBackend + ?Sized,
{
    async fn create(&self, request: &VendorOrderRequest) -> Result<Order, BackendError> {
        (**self).create(request).await
    }

    async fn get_by_id(&self, id: OrderId) -> Result<Order, BackendError> {
        (**self).get_by_id(id).await
    }

    async fn list_for_customer(&self) -> Result<Vec<Order>, BackendError> {
        (**self).list_for_customer().await
    }

    async fn list_for_vendor(&self, vendor_id: &VendorId) -> Result<Vec<Order>, BackendError> {
        (**self).list_for_vendor(vendor_id).await
    }

    async fn update_status(
        &self,
        id: OrderId,
        expected: OrderStatus,
        target: OrderStatus,
    ) -> Result<Order, BackendError> {
        (**self).update_status(id, expected, target).await
    }

    async fn cancel(&self, id: OrderId, reason: &str) -> Result<Order, BackendError> {
        (**self).cancel(id, reason).await
    }
}
