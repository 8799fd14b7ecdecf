use serde::{Deserialize, Serialize};

/// The actor requesting an order-status change.
///
/// The courier role belongs to an external logistics actor; it appears here
/// only so the transition table can state which changes are *not* ours to
/// make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    Customer,
    Vendor,
    Courier,
}

impl ActorRole {
    pub const ALL: [ActorRole; 3] = [ActorRole::Customer, ActorRole::Vendor, ActorRole::Courier];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActorRole::Customer => "customer",
            ActorRole::Vendor => "vendor",
            ActorRole::Courier => "courier",
        }
    }
}

impl core::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
