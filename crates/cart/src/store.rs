use serde::{Deserialize, Serialize};

use bazaar_core::{CatalogItemId, VendorId};

use crate::feed::{SnapshotFeed, SnapshotSubscription};
use crate::item::CartLineItem;

/// Items of a single vendor, in cart insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorGroup {
    pub vendor_id: VendorId,
    pub vendor_name: String,
    pub items: Vec<CartLineItem>,
}

impl VendorGroup {
    pub fn subtotal(&self) -> u64 {
        self.items.iter().map(CartLineItem::line_total).sum()
    }
}

/// Per-vendor share of the cart total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorTotal {
    pub vendor_id: VendorId,
    pub amount: u64,
}

/// Immutable view of the cart, published to subscribers after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub items: Vec<CartLineItem>,
    pub per_vendor_totals: Vec<VendorTotal>,
    pub grand_total: u64,
    pub item_count: i64,
}

/// Single-writer cart aggregate.
///
/// Insertion order of lines is preserved, and vendor grouping is in
/// first-seen vendor order. Totals are derived on read, never cached.
#[derive(Debug, Default)]
pub struct CartStore {
    items: Vec<CartLineItem>,
    feed: SnapshotFeed,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a line, merging with an existing line for the same catalog id.
    ///
    /// The incoming `quantity` is the delta to apply (normalized to at least
    /// 1, so a plain "add to cart" tap adds one unit).
    pub fn add_item(&mut self, item: CartLineItem) {
        let delta = item.quantity.max(1);

        match self.items.iter_mut().find(|line| line.id == item.id) {
            Some(line) => line.quantity += delta,
            None => {
                let mut line = item;
                line.quantity = delta;
                self.items.push(line);
            }
        }

        self.publish();
    }

    /// Delete the line unconditionally. Unknown ids are a no-op.
    pub fn remove_item(&mut self, id: &CatalogItemId) {
        let before = self.items.len();
        self.items.retain(|line| line.id != *id);

        if self.items.len() != before {
            self.publish();
        }
    }

    /// Set a line's quantity; zero or below removes the line.
    pub fn update_quantity(&mut self, id: &CatalogItemId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }

        match self.items.iter_mut().find(|line| line.id == *id) {
            Some(line) => {
                line.quantity = quantity;
                self.publish();
            }
            None => {
                tracing::debug!(item_id = %id, "update_quantity for id not in cart");
            }
        }
    }

    /// Empty the cart. Invoked only after a fully successful checkout.
    pub fn clear(&mut self) {
        self.items.clear();
        self.publish();
    }

    /// Sum of all line quantities, recomputed on read.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    /// Sum of price×quantity over all lines, recomputed on read.
    pub fn total_amount(&self) -> u64 {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Partition the cart by vendor, in first-seen vendor order.
    ///
    /// Every line lands in exactly one group; the union of all groups is the
    /// full cart. Each vendor fulfills independently, so checkout consumes
    /// this partition to build one order per vendor.
    pub fn by_vendor(&self) -> Vec<VendorGroup> {
        let mut groups: Vec<VendorGroup> = Vec::new();

        for line in &self.items {
            match groups.iter_mut().find(|g| g.vendor_id == line.vendor_id) {
                Some(group) => group.items.push(line.clone()),
                None => groups.push(VendorGroup {
                    vendor_id: line.vendor_id.clone(),
                    vendor_name: line.vendor_name.clone(),
                    items: vec![line.clone()],
                }),
            }
        }

        groups
    }

    /// Build an immutable snapshot of the current cart state.
    pub fn snapshot(&self) -> CartSnapshot {
        let per_vendor_totals = self
            .by_vendor()
            .iter()
            .map(|group| VendorTotal {
                vendor_id: group.vendor_id.clone(),
                amount: group.subtotal(),
            })
            .collect();

        CartSnapshot {
            items: self.items.clone(),
            per_vendor_totals,
            grand_total: self.total_amount(),
            item_count: self.total_quantity(),
        }
    }

    /// Subscribe to snapshot publications.
    pub fn subscribe(&self) -> SnapshotSubscription {
        self.feed.subscribe()
    }

    fn publish(&self) {
        self.feed.publish(self.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::VendorKind;

    fn line(id: &str, vendor: &str, price: u64, quantity: i64) -> CartLineItem {
        CartLineItem {
            id: CatalogItemId::new(id),
            name: id.to_uppercase(),
            price,
            quantity,
            vendor_id: VendorId::new(vendor),
            vendor_name: format!("Vendor {vendor}"),
            vendor_kind: VendorKind::Restaurant,
            description: None,
            image_url: None,
        }
    }

    #[test]
    fn totals_over_multi_line_cart() {
        let mut cart = CartStore::new();
        cart.add_item(line("m1", "r1", 50, 1));
        cart.add_item(line("m2", "r1", 30, 2));

        assert_eq!(cart.total_amount(), 110);
        assert_eq!(cart.total_quantity(), 3);

        let groups = cart.by_vendor();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].vendor_id, VendorId::new("r1"));
        let ids: Vec<&str> = groups[0].items.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
    }

    #[test]
    fn adding_same_id_twice_merges_quantities() {
        let mut merged = CartStore::new();
        merged.add_item(line("m1", "r1", 50, 2));
        merged.add_item(line("m1", "r1", 50, 3));

        let mut updated = CartStore::new();
        updated.add_item(line("m1", "r1", 50, 2));
        updated.update_quantity(&CatalogItemId::new("m1"), 5);

        assert_eq!(merged.items(), updated.items());
        assert_eq!(merged.total_quantity(), 5);
    }

    #[test]
    fn add_normalizes_non_positive_delta_to_one() {
        let mut cart = CartStore::new();
        cart.add_item(line("m1", "r1", 50, 0));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn update_quantity_to_zero_removes_line() {
        let mut cart = CartStore::new();
        cart.add_item(line("m1", "r1", 50, 2));
        cart.update_quantity(&CatalogItemId::new("m1"), 0);

        assert!(cart.is_empty());
        assert_eq!(cart.total_amount(), 0);
    }

    #[test]
    fn remove_item_deletes_unconditionally() {
        let mut cart = CartStore::new();
        cart.add_item(line("m1", "r1", 50, 4));
        cart.remove_item(&CatalogItemId::new("m1"));

        assert!(cart.is_empty());
    }

    #[test]
    fn by_vendor_partitions_without_loss_or_duplication() {
        let mut cart = CartStore::new();
        cart.add_item(line("m1", "r1", 50, 1));
        cart.add_item(line("s1", "s2", 20, 1));
        cart.add_item(line("m2", "r1", 30, 2));
        cart.add_item(line("p1", "p3", 15, 1));

        let groups = cart.by_vendor();

        // First-seen vendor order.
        let vendors: Vec<&str> = groups.iter().map(|g| g.vendor_id.as_str()).collect();
        assert_eq!(vendors, vec!["r1", "s2", "p3"]);

        // Union of groups equals the cart, with no duplicates.
        let mut regrouped: Vec<CartLineItem> =
            groups.into_iter().flat_map(|g| g.items).collect();
        assert_eq!(regrouped.len(), cart.items().len());
        regrouped.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        let mut original = cart.items().to_vec();
        original.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        assert_eq!(regrouped, original);
    }

    #[test]
    fn snapshot_carries_per_vendor_totals_and_counts() {
        let mut cart = CartStore::new();
        cart.add_item(line("m1", "r1", 50, 1));
        cart.add_item(line("s1", "s2", 20, 3));

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.grand_total, 110);
        assert_eq!(snapshot.item_count, 4);
        assert_eq!(
            snapshot.per_vendor_totals,
            vec![
                VendorTotal {
                    vendor_id: VendorId::new("r1"),
                    amount: 50,
                },
                VendorTotal {
                    vendor_id: VendorId::new("s2"),
                    amount: 60,
                },
            ]
        );
    }

    #[test]
    fn subscribers_receive_a_snapshot_per_mutation() {
        let mut cart = CartStore::new();
        let subscription = cart.subscribe();

        cart.add_item(line("m1", "r1", 50, 1));
        cart.update_quantity(&CatalogItemId::new("m1"), 4);
        cart.clear();

        let after_add = subscription.try_recv().unwrap();
        assert_eq!(after_add.item_count, 1);

        let after_update = subscription.try_recv().unwrap();
        assert_eq!(after_update.grand_total, 200);

        let after_clear = subscription.try_recv().unwrap();
        assert!(after_clear.items.is_empty());
        assert!(subscription.try_recv().is_err());
    }

    #[test]
    fn noop_mutations_publish_nothing() {
        let mut cart = CartStore::new();
        cart.add_item(line("m1", "r1", 50, 1));
        let subscription = cart.subscribe();

        cart.remove_item(&CatalogItemId::new("missing"));
        cart.update_quantity(&CatalogItemId::new("missing"), 3);

        assert!(subscription.try_recv().is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum CartOp {
            Add { slot: usize, quantity: i64 },
            Remove { slot: usize },
            Update { slot: usize, quantity: i64 },
        }

        // Fixed pool of catalog entries spanning two vendors.
        const SLOTS: [(&str, &str, u64); 4] = [
            ("m1", "r1", 50),
            ("m2", "r1", 30),
            ("s1", "s2", 20),
            ("s2", "s2", 75),
        ];

        fn slot_line(slot: usize, quantity: i64) -> CartLineItem {
            let (id, vendor, price) = SLOTS[slot];
            line(id, vendor, price, quantity)
        }

        fn op_strategy() -> impl Strategy<Value = CartOp> {
            prop_oneof![
                (0..SLOTS.len(), 0i64..5).prop_map(|(slot, quantity)| CartOp::Add {
                    slot,
                    quantity
                }),
                (0..SLOTS.len()).prop_map(|slot| CartOp::Remove { slot }),
                (0..SLOTS.len(), -2i64..6).prop_map(|(slot, quantity)| CartOp::Update {
                    slot,
                    quantity
                }),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: after any op sequence, derived totals equal a manual
            /// recompute over the stored lines, and no stored quantity is
            /// ever below 1.
            #[test]
            fn totals_always_match_recompute(ops in prop::collection::vec(op_strategy(), 0..40)) {
                let mut cart = CartStore::new();

                for op in ops {
                    match op {
                        CartOp::Add { slot, quantity } => cart.add_item(slot_line(slot, quantity)),
                        CartOp::Remove { slot } => {
                            cart.remove_item(&CatalogItemId::new(SLOTS[slot].0));
                        }
                        CartOp::Update { slot, quantity } => {
                            cart.update_quantity(&CatalogItemId::new(SLOTS[slot].0), quantity);
                        }
                    }
                }

                let expected_quantity: i64 = cart.items().iter().map(|l| l.quantity).sum();
                let expected_amount: u64 =
                    cart.items().iter().map(|l| l.price * l.quantity as u64).sum();

                prop_assert_eq!(cart.total_quantity(), expected_quantity);
                prop_assert_eq!(cart.total_amount(), expected_amount);
                prop_assert!(cart.items().iter().all(|l| l.quantity >= 1));
            }
        }
    }
}
