//! Vendor classification.

use serde::{Deserialize, Serialize};

/// The kind of storefront a vendor operates.
///
/// Each vendor fulfills exactly one category of order; a single cart may
/// still mix items from vendors of different kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorKind {
    Restaurant,
    Shop,
    Pharmacy,
}

impl VendorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VendorKind::Restaurant => "restaurant",
            VendorKind::Shop => "shop",
            VendorKind::Pharmacy => "pharmacy",
        }
    }
}

impl core::fmt::Display for VendorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
