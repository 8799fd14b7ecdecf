use serde::{Deserialize, Serialize};

use bazaar_core::{CatalogItemId, VendorId, VendorKind};

/// A selected catalog item pending order creation.
///
/// The price is snapshotted at add-to-cart time; the backend re-prices every
/// line at order creation, so cart totals and order totals may legitimately
/// differ if the catalog changed in between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Catalog identifier, unique within the cart regardless of vendor.
    pub id: CatalogItemId,
    pub name: String,
    /// Price in smallest currency unit (e.g., cents).
    pub price: u64,
    /// Always >= 1 while stored; a quantity driven to 0 removes the line.
    pub quantity: i64,
    pub vendor_id: VendorId,
    pub vendor_name: String,
    pub vendor_kind: VendorKind,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl CartLineItem {
    pub fn line_total(&self) -> u64 {
        self.price * self.quantity as u64
    }
}
