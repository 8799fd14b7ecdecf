use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bazaar_core::{CatalogItemId, CustomerId, OrderId, VendorId};

use crate::lifecycle::{TransitionError, validate_transition};
use crate::role::ActorRole;
use crate::status::OrderStatus;

/// Order line: catalog item, quantity, and the price frozen at creation.
///
/// `price_at_order_time` is assigned by the backend and is independent of
/// any later catalog price change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub catalog_item_id: CatalogItemId,
    pub quantity: i64,
    /// Price in smallest currency unit (e.g., cents).
    pub price_at_order_time: u64,
}

/// A vendor-scoped, persisted purchase request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub vendor_id: VendorId,
    pub customer_id: CustomerId,
    pub items: Vec<OrderLineItem>,
    pub status: OrderStatus,
    pub total_amount: u64,
    pub delivery_address: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub estimated_delivery_time: Option<DateTime<Utc>>,
}

impl Order {
    /// Apply a role-gated status change.
    ///
    /// The change either fully applies or has no effect at all: on any
    /// refusal the order is left exactly as it was.
    pub fn transition(
        &mut self,
        role: ActorRole,
        target: OrderStatus,
    ) -> Result<(), TransitionError> {
        validate_transition(self.status, role, target)?;
        self.status = target;
        Ok(())
    }
}

/// Requested line inside a [`VendorOrderRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedItem {
    pub catalog_item_id: CatalogItemId,
    pub quantity: i64,
}

/// Order-creation request for a single vendor's share of a cart.
///
/// Prices are intentionally absent: the backend is the sole source of truth
/// for `price_at_order_time`, which keeps client-side price tampering out of
/// the trust boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorOrderRequest {
    pub vendor_id: VendorId,
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub items: Vec<RequestedItem>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_order(status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(),
            vendor_id: VendorId::new("r1"),
            customer_id: CustomerId::new(),
            items: vec![OrderLineItem {
                catalog_item_id: CatalogItemId::new("m1"),
                quantity: 2,
                price_at_order_time: 50,
            }],
            status,
            total_amount: 100,
            delivery_address: "12 Harbor Lane".to_string(),
            customer_name: "Dana".to_string(),
            customer_phone: "+15550001111".to_string(),
            notes: None,
            created_at: Utc::now(),
            estimated_delivery_time: None,
        }
    }

    #[test]
    fn vendor_advances_through_the_full_preparation_path() {
        let mut order = test_order(OrderStatus::Pending);

        order.transition(ActorRole::Vendor, OrderStatus::Accepted).unwrap();
        order.transition(ActorRole::Vendor, OrderStatus::Preparing).unwrap();
        order.transition(ActorRole::Vendor, OrderStatus::Ready).unwrap();

        assert_eq!(order.status, OrderStatus::Ready);
    }

    #[test]
    fn refused_transition_leaves_order_untouched() {
        let mut order = test_order(OrderStatus::Ready);
        let before = order.clone();

        let err = order
            .transition(ActorRole::Customer, OrderStatus::Cancelled)
            .unwrap_err();

        assert!(matches!(err, TransitionError::Illegal { .. }));
        assert_eq!(order, before);
    }

    #[test]
    fn terminal_order_rejects_every_change() {
        let mut order = test_order(OrderStatus::Delivered);
        let before = order.clone();

        for role in ActorRole::ALL {
            for target in OrderStatus::ALL {
                let err = order.transition(role, target).unwrap_err();
                assert_eq!(err, TransitionError::Terminal(OrderStatus::Delivered));
            }
        }

        assert_eq!(order, before);
    }

    #[test]
    fn status_wire_format_accepts_processing_alias() {
        let status: OrderStatus = serde_json::from_str("\"processing\"").unwrap();
        assert_eq!(status, OrderStatus::Preparing);

        // And our own spelling round-trips.
        assert_eq!(serde_json::to_string(&OrderStatus::Preparing).unwrap(), "\"preparing\"");
    }
}
