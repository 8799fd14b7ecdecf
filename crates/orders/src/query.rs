//! Read-side partitioning and filtering of order collections.
//!
//! Nothing here mutates; these functions shape a fetched order list for
//! presentation.

use crate::order::Order;
use crate::status::OrderStatus;

/// Orders split into "live" (still being fulfilled) and "past" (terminal).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrderPartition {
    pub live: Vec<Order>,
    pub past: Vec<Order>,
}

/// Split orders for customer-facing summaries.
///
/// Membership is derived from [`OrderStatus::is_terminal`], so this partition
/// stays in lockstep with the status set: a status added to the lifecycle
/// lands on one side or the other by construction, never in neither.
pub fn partition_by_phase(orders: Vec<Order>) -> OrderPartition {
    let mut partition = OrderPartition::default();

    for order in orders {
        if order.status.is_terminal() {
            partition.past.push(order);
        } else {
            partition.live.push(order);
        }
    }

    partition
}

/// Vendor-facing exact-match status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

/// Keep only the orders the filter admits, preserving input order.
pub fn filter_by_status(orders: &[Order], filter: StatusFilter) -> Vec<Order> {
    orders
        .iter()
        .filter(|order| filter.matches(order.status))
        .cloned()
        .collect()
}
