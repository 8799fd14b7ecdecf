//! Snapshot publication for cart consumers.
//!
//! Consumers subscribe and receive a fresh immutable [`CartSnapshot`] after
//! every cart mutation, instead of reading shared mutable state.
//!
//! - No IO / no async
//! - Best-effort fan-out
//! - Dropped subscriptions are pruned on the next publish

use std::sync::{Mutex, mpsc};
use std::time::Duration;

use crate::store::CartSnapshot;

/// A subscription to the cart snapshot feed.
///
/// Subscriptions are designed for single-threaded consumption; hand each one
/// to exactly one consumer.
#[derive(Debug)]
pub struct SnapshotSubscription {
    receiver: mpsc::Receiver<CartSnapshot>,
}

impl SnapshotSubscription {
    /// Block until the next snapshot is available.
    pub fn recv(&self) -> Result<CartSnapshot, mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a snapshot without blocking.
    pub fn try_recv(&self) -> Result<CartSnapshot, mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a snapshot.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<CartSnapshot, mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// In-process fan-out of cart snapshots.
#[derive(Debug, Default)]
pub(crate) struct SnapshotFeed {
    subscribers: Mutex<Vec<mpsc::Sender<CartSnapshot>>>,
}

impl SnapshotFeed {
    pub(crate) fn publish(&self, snapshot: CartSnapshot) {
        let Ok(mut subs) = self.subscribers.lock() else {
            return;
        };

        // Drop any dead subscribers while publishing.
        subs.retain(|tx| tx.send(snapshot.clone()).is_ok());
    }

    pub(crate) fn subscribe(&self) -> SnapshotSubscription {
        let (tx, rx) = mpsc::channel();

        // If the lock is poisoned, we still return a subscription;
        // it just won't receive snapshots until the process restarts.
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }

        SnapshotSubscription { receiver: rx }
    }
}
