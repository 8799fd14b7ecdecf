//! Checkout module.
//!
//! Converts a cart into one order-creation request per vendor and submits
//! them as independent calls. Synchronous validation (empty cart, missing
//! contact fields) happens before any network IO; a partially failed
//! multi-vendor checkout is reported per vendor and never rolled back.

pub mod service;
pub mod splitter;

pub use service::{
    Checkout, CheckoutOutcome, CheckoutQuote, FailedRequest, FeeSchedule, PlacedOrder,
};
pub use splitter::{CustomerInfo, split_cart};
