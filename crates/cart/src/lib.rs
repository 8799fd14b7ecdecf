//! Cart domain module.
//!
//! This crate owns the canonical in-memory set of selected line items. The
//! cart is a **single-writer** aggregate: one client session mutates it, and
//! presentation-layer consumers observe it through immutable snapshots
//! published on every mutation (no shared mutable references).

pub mod feed;
pub mod item;
pub mod store;

pub use feed::SnapshotSubscription;
pub use item::CartLineItem;
pub use store::{CartSnapshot, CartStore, VendorGroup, VendorTotal};
