//! Asynchronous checkout over the order backend.

use bazaar_cart::CartStore;
use bazaar_client::{BackendError, OrderBackend, ProfileCache, ProfileField};
use bazaar_core::{DomainResult, VendorId};
use bazaar_orders::{Order, VendorOrderRequest};

use crate::splitter::{CustomerInfo, split_cart};

/// Checkout-time fees.
///
/// The delivery/service fee is flat and applied **once per checkout**, not
/// once per vendor order, and it is display-only: it never travels to the
/// backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeeSchedule {
    pub delivery_fee: u64,
}

impl FeeSchedule {
    pub fn new(delivery_fee: u64) -> Self {
        Self { delivery_fee }
    }
}

/// Displayed totals for a checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutQuote {
    pub items_total: u64,
    pub delivery_fee: u64,
    pub grand_total: u64,
}

/// One vendor order that was created successfully.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub vendor_id: VendorId,
    pub order: Order,
}

/// One vendor request that failed, retained verbatim for retry.
#[derive(Debug)]
pub struct FailedRequest {
    pub request: VendorOrderRequest,
    pub error: BackendError,
}

/// Per-vendor result of a checkout submission.
///
/// Already-created orders are never rolled back when a later vendor fails;
/// the caller sees exactly which orders went through and may retry only the
/// failed requests.
#[derive(Debug, Default)]
pub struct CheckoutOutcome {
    pub placed: Vec<PlacedOrder>,
    pub failed: Vec<FailedRequest>,
}

impl CheckoutOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Checkout service: split, submit, and settle the session state.
#[derive(Debug)]
pub struct Checkout<B> {
    backend: B,
    fees: FeeSchedule,
    profile: ProfileCache,
}

impl<B: OrderBackend> Checkout<B> {
    pub fn new(backend: B, fees: FeeSchedule, profile: ProfileCache) -> Self {
        Self {
            backend,
            fees,
            profile,
        }
    }

    /// Displayed totals for the cart as it stands.
    pub fn quote(&self, cart: &CartStore) -> CheckoutQuote {
        let items_total = cart.total_amount();

        CheckoutQuote {
            items_total,
            delivery_fee: self.fees.delivery_fee,
            grand_total: items_total + self.fees.delivery_fee,
        }
    }

    /// Convert the cart into per-vendor orders.
    ///
    /// Validation failures surface before any request is dispatched. Once
    /// dispatched, the request set runs to completion; there is no partial
    /// abort. On full success the contact fields are remembered and the cart
    /// is cleared; on partial failure the cart is left untouched.
    pub async fn place_orders(
        &self,
        cart: &mut CartStore,
        customer: &CustomerInfo,
    ) -> DomainResult<CheckoutOutcome> {
        let requests = split_cart(cart, customer)?;
        let outcome = self.submit(requests).await;

        if outcome.is_complete() {
            self.remember(customer);
            cart.clear();
        }

        Ok(outcome)
    }

    /// Re-submit the failed share of a previous checkout.
    ///
    /// On success the checkout is now fully settled, so the same
    /// profile-persist and cart-clear follow-through applies.
    pub async fn retry(
        &self,
        cart: &mut CartStore,
        customer: &CustomerInfo,
        failed: Vec<FailedRequest>,
    ) -> CheckoutOutcome {
        let outcome = self
            .submit(failed.into_iter().map(|f| f.request).collect())
            .await;

        if outcome.is_complete() {
            self.remember(customer);
            cart.clear();
        }

        outcome
    }

    async fn submit(&self, requests: Vec<VendorOrderRequest>) -> CheckoutOutcome {
        let mut outcome = CheckoutOutcome::default();

        for request in requests {
            let vendor_id = request.vendor_id.clone();

            match self.backend.create(&request).await {
                Ok(order) => {
                    tracing::info!(vendor_id = %vendor_id, order_id = %order.id, "order created");
                    outcome.placed.push(PlacedOrder { vendor_id, order });
                }
                Err(error) => {
                    tracing::warn!(vendor_id = %vendor_id, %error, "vendor order failed");
                    outcome.failed.push(FailedRequest { request, error });
                }
            }
        }

        outcome
    }

    fn remember(&self, customer: &CustomerInfo) {
        self.profile.put(ProfileField::Name, &customer.customer_name);
        self.profile.put(ProfileField::Phone, &customer.customer_phone);
        self.profile
            .put(ProfileField::Address, &customer.delivery_address);
    }
}
