//! Outcome resolver port.
//!
//! Decides the status a new payment or refund is recorded with. A real
//! processor integration would implement this; the service never talks to
//! one directly.

use crate::domain::{Payment, PaymentStatus, Refund, RefundStatus};

#[async_trait::async_trait]
pub trait OutcomeResolver: Send + Sync + 'static {
    /// Status for a payment that passed validation and is about to be stored.
    async fn resolve_payment(&self, payment: &Payment) -> PaymentStatus;

    /// Status for a refund that passed validation against `payment`.
    async fn resolve_refund(&self, refund: &Refund, payment: &Payment) -> RefundStatus;
}

/// Records every payment and refund as `succeeded`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysSucceeds;

#[async_trait::async_trait]
impl OutcomeResolver for AlwaysSucceeds {
    async fn resolve_payment(&self, _payment: &Payment) -> PaymentStatus {
        PaymentStatus::Succeeded
    }

    async fn resolve_refund(&self, _refund: &Refund, _payment: &Payment) -> RefundStatus {
        RefundStatus::Succeeded
    }
}
