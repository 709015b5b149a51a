//! Entity store port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (SQLite, in-memory fakes) implement this trait.

use crate::domain::{
    Customer, CustomerId, Payment, PaymentId, PaymentMethod, PaymentMethodId, Refund, RefundId,
};
use crate::error::RepoError;

/// Durable keyed storage for every entity kind.
///
/// Each kind has its own typed methods. `insert_*` performs exactly one
/// write and must be atomic on its own. `get_*` returns `Ok(None)` on a miss.
/// `list_*` returns rows in creation order, filtered by equality on the
/// optional key, and never more than `limit` rows.
#[async_trait::async_trait]
pub trait EntityStore: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────────
    // Customers
    // ─────────────────────────────────────────────────────────────────────────────

    async fn insert_customer(&self, customer: &Customer) -> Result<(), RepoError>;

    async fn get_customer(&self, id: &CustomerId) -> Result<Option<Customer>, RepoError>;

    async fn list_customers(&self, limit: u32) -> Result<Vec<Customer>, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Payment methods
    // ─────────────────────────────────────────────────────────────────────────────

    async fn insert_payment_method(&self, method: &PaymentMethod) -> Result<(), RepoError>;

    async fn get_payment_method(
        &self,
        id: &PaymentMethodId,
    ) -> Result<Option<PaymentMethod>, RepoError>;

    async fn list_payment_methods(
        &self,
        customer_id: Option<&CustomerId>,
        limit: u32,
    ) -> Result<Vec<PaymentMethod>, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Payments
    // ─────────────────────────────────────────────────────────────────────────────

    async fn insert_payment(&self, payment: &Payment) -> Result<(), RepoError>;

    async fn get_payment(&self, id: &PaymentId) -> Result<Option<Payment>, RepoError>;

    async fn list_payments(
        &self,
        customer_id: Option<&CustomerId>,
        limit: u32,
    ) -> Result<Vec<Payment>, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Refunds
    // ─────────────────────────────────────────────────────────────────────────────

    async fn insert_refund(&self, refund: &Refund) -> Result<(), RepoError>;

    async fn get_refund(&self, id: &RefundId) -> Result<Option<Refund>, RepoError>;

    async fn list_refunds(
        &self,
        payment_id: Option<&PaymentId>,
        limit: u32,
    ) -> Result<Vec<Refund>, RepoError>;
}
