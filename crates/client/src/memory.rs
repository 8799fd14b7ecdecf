//! In-memory order backend for tests/dev.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use bazaar_core::{CatalogItemId, CustomerId, OrderId, VendorId};
use bazaar_orders::{Order, OrderLineItem, OrderStatus, TransitionError, VendorOrderRequest};

use crate::backend::OrderBackend;
use crate::error::BackendError;

/// In-memory stand-in for the order backend.
///
/// Behaves like the real thing where the contract matters:
/// - prices every requested line from a seeded catalog (`create` is the sole
///   source of `price_at_order_time`)
/// - enforces optimistic concurrency on `update_status`
/// - treats terminal orders as immutable
/// - re-applying a `(status -> same status)` pair is a no-op
///
/// Tests can additionally inject per-vendor create failures to exercise
/// partial-checkout handling.
#[derive(Debug)]
pub struct InMemoryOrderBackend {
    customer_id: CustomerId,
    catalog: HashMap<CatalogItemId, u64>,
    orders: Mutex<HashMap<OrderId, Order>>,
    failing_vendors: Mutex<HashSet<VendorId>>,
}

impl InMemoryOrderBackend {
    pub fn new(customer_id: CustomerId) -> Self {
        Self::with_catalog(customer_id, [])
    }

    pub fn with_catalog(
        customer_id: CustomerId,
        catalog: impl IntoIterator<Item = (CatalogItemId, u64)>,
    ) -> Self {
        Self {
            customer_id,
            catalog: catalog.into_iter().collect(),
            orders: Mutex::new(HashMap::new()),
            failing_vendors: Mutex::new(HashSet::new()),
        }
    }

    /// Make every `create` for this vendor fail with a network error.
    pub fn fail_creates_for(&self, vendor_id: &VendorId) {
        self.failing_vendors
            .lock()
            .expect("failing_vendors lock poisoned")
            .insert(vendor_id.clone());
    }

    /// Undo [`Self::fail_creates_for`].
    pub fn restore_vendor(&self, vendor_id: &VendorId) {
        self.failing_vendors
            .lock()
            .expect("failing_vendors lock poisoned")
            .remove(vendor_id);
    }
}

#[async_trait]
impl OrderBackend for InMemoryOrderBackend {
    async fn create(&self, request: &VendorOrderRequest) -> Result<Order, BackendError> {
        {
            let failing = self
                .failing_vendors
                .lock()
                .expect("failing_vendors lock poisoned");
            if failing.contains(&request.vendor_id) {
                return Err(BackendError::Network(format!(
                    "injected create failure for vendor {}",
                    request.vendor_id
                )));
            }
        }

        let mut items = Vec::with_capacity(request.items.len());
        for line in &request.items {
            let price = self.catalog.get(&line.catalog_item_id).ok_or_else(|| {
                BackendError::Rejected(format!(
                    "unknown catalog item {}",
                    line.catalog_item_id
                ))
            })?;

            items.push(OrderLineItem {
                catalog_item_id: line.catalog_item_id.clone(),
                quantity: line.quantity,
                price_at_order_time: *price,
            });
        }

        let total_amount = items
            .iter()
            .map(|line| line.price_at_order_time * line.quantity as u64)
            .sum();

        let order = Order {
            id: OrderId::new(),
            vendor_id: request.vendor_id.clone(),
            customer_id: self.customer_id,
            items,
            status: OrderStatus::Pending,
            total_amount,
            delivery_address: request.delivery_address.clone(),
            customer_name: request.customer_name.clone(),
            customer_phone: request.customer_phone.clone(),
            notes: request.notes.clone(),
            created_at: Utc::now(),
            estimated_delivery_time: None,
        };

        self.orders
            .lock()
            .expect("orders lock poisoned")
            .insert(order.id, order.clone());

        Ok(order)
    }

    async fn get_by_id(&self, id: OrderId) -> Result<Order, BackendError> {
        self.orders
            .lock()
            .expect("orders lock poisoned")
            .get(&id)
            .cloned()
            .ok_or(BackendError::NotFound)
    }

    async fn list_for_customer(&self) -> Result<Vec<Order>, BackendError> {
        let orders = self.orders.lock().expect("orders lock poisoned");

        let mut all: Vec<Order> = orders.values().cloned().collect();
        all.sort_by_key(|order| order.created_at);
        Ok(all)
    }

    async fn list_for_vendor(&self, vendor_id: &VendorId) -> Result<Vec<Order>, BackendError> {
        let orders = self.orders.lock().expect("orders lock poisoned");

        let mut matching: Vec<Order> = orders
            .values()
            .filter(|order| order.vendor_id == *vendor_id)
            .cloned()
            .collect();
        matching.sort_by_key(|order| order.created_at);
        Ok(matching)
    }

    async fn update_status(
        &self,
        id: OrderId,
        expected: OrderStatus,
        target: OrderStatus,
    ) -> Result<Order, BackendError> {
        let mut orders = self.orders.lock().expect("orders lock poisoned");
        let order = orders.get_mut(&id).ok_or(BackendError::NotFound)?;

        // The write is conditional on the expected source status, full stop:
        // a racing writer that lost must re-fetch and retry.
        if order.status != expected {
            return Err(TransitionError::Stale {
                expected,
                actual: order.status,
            }
            .into());
        }

        // Re-applying a (status -> same status) pair is a no-op.
        if order.status == target {
            return Ok(order.clone());
        }

        if order.status.is_terminal() {
            return Err(TransitionError::Terminal(order.status).into());
        }

        order.status = target;
        Ok(order.clone())
    }

    async fn cancel(&self, id: OrderId, reason: &str) -> Result<Order, BackendError> {
        let mut orders = self.orders.lock().expect("orders lock poisoned");
        let order = orders.get_mut(&id).ok_or(BackendError::NotFound)?;

        if order.status == OrderStatus::Cancelled {
            return Ok(order.clone());
        }

        if order.status.is_terminal() {
            return Err(TransitionError::Terminal(order.status).into());
        }

        tracing::info!(order_id = %id, reason, "order cancelled");
        order.status = OrderStatus::Cancelled;
        Ok(order.clone())
    }
}
