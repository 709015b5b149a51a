//! Identifier generator port.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::domain::IdKind;

/// Produces `{prefix}_{suffix}` identifiers.
///
/// Two calls in the same process never return the same identifier.
pub trait IdGenerator: Send + Sync + 'static {
    fn next_id(&self, kind: IdKind) -> String;
}

/// Time-ordered identifiers backed by UUIDv7.
///
/// Suffixes sort by creation time and stay unique across restarts, which
/// matters once the store outlives the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeOrderedIds;

impl IdGenerator for TimeOrderedIds {
    fn next_id(&self, kind: IdKind) -> String {
        kind.format(Uuid::now_v7().simple())
    }
}

/// Per-kind counters starting at 1 (`cus_1`, `cus_2`, `pm_1`, ...).
///
/// Counters live in memory only; pair with a store that starts empty.
#[derive(Debug, Default)]
pub struct SequentialIds {
    customers: AtomicU64,
    payment_methods: AtomicU64,
    payments: AtomicU64,
    refunds: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, kind: IdKind) -> &AtomicU64 {
        match kind {
            IdKind::Customer => &self.customers,
            IdKind::PaymentMethod => &self.payment_methods,
            IdKind::Payment => &self.payments,
            IdKind::Refund => &self.refunds,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self, kind: IdKind) -> String {
        let n = self.counter(kind).fetch_add(1, Ordering::Relaxed) + 1;
        kind.format(n)
    }
}
