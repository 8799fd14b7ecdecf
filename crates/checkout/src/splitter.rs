use serde::{Deserialize, Serialize};

use bazaar_cart::CartStore;
use bazaar_core::{DomainError, DomainResult};
use bazaar_orders::{RequestedItem, VendorOrderRequest};

/// Contact and delivery fields collected at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub notes: Option<String>,
}

impl CustomerInfo {
    /// Checked synchronously, before any order request leaves the client.
    pub fn validate(&self) -> DomainResult<()> {
        if self.customer_name.trim().is_empty() {
            return Err(DomainError::validation("customer_name is required"));
        }
        if self.customer_phone.trim().is_empty() {
            return Err(DomainError::validation("customer_phone is required"));
        }
        if self.delivery_address.trim().is_empty() {
            return Err(DomainError::validation("delivery_address is required"));
        }
        Ok(())
    }
}

/// Split a cart into one creation request per vendor.
///
/// Groups via [`CartStore::by_vendor`], so each request carries exactly that
/// vendor's lines in insertion order. Prices are left out on purpose: the
/// backend alone assigns `price_at_order_time`.
pub fn split_cart(
    cart: &CartStore,
    customer: &CustomerInfo,
) -> DomainResult<Vec<VendorOrderRequest>> {
    if cart.is_empty() {
        return Err(DomainError::EmptyCart);
    }

    customer.validate()?;

    let requests = cart
        .by_vendor()
        .into_iter()
        .map(|group| VendorOrderRequest {
            vendor_id: group.vendor_id,
            customer_name: customer.customer_name.clone(),
            customer_phone: customer.customer_phone.clone(),
            delivery_address: customer.delivery_address.clone(),
            items: group
                .items
                .into_iter()
                .map(|line| RequestedItem {
                    catalog_item_id: line.id,
                    quantity: line.quantity,
                })
                .collect(),
            notes: customer.notes.clone(),
        })
        .collect();

    Ok(requests)
}
