//! Refund domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::{PaymentId, RefundId};
use crate::error::DomainError;

/// Outcome of a refund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RefundStatus {
    Pending,
    Succeeded,
    Failed,
}

impl RefundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefundStatus::Pending => "pending",
            RefundStatus::Succeeded => "succeeded",
            RefundStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for RefundStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RefundStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RefundStatus::Pending),
            "succeeded" => Ok(RefundStatus::Succeeded),
            "failed" => Ok(RefundStatus::Failed),
            other => Err(DomainError::ValidationError(format!(
                "Unknown refund status: {}",
                other
            ))),
        }
    }
}

/// A refund issued against a succeeded payment.
///
/// Several refunds may target the same payment. Each one is bounded by the
/// payment amount on its own; the refunded total is not tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Refund {
    /// Unique identifier
    pub id: RefundId,
    /// Payment being refunded
    pub payment_id: PaymentId,
    /// Amount to refund in minor currency units
    #[schema(example = 2000)]
    pub amount: i64,
    /// Status of the refund
    pub status: RefundStatus,
    /// Reason for the refund
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "requested_by_customer")]
    pub reason: Option<String>,
    /// When the refund was created
    pub created_at: DateTime<Utc>,
    /// When the refund was last updated
    pub updated_at: DateTime<Utc>,
}

impl Refund {
    /// Creates a refund in the `pending` state.
    ///
    /// Amount bounds are checked against the payment by the validator,
    /// not here.
    pub fn pending(
        id: RefundId,
        payment_id: PaymentId,
        amount: i64,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            payment_id,
            amount,
            status: RefundStatus::Pending,
            reason: reason.filter(|r| !r.trim().is_empty()),
            created_at: now,
            updated_at: now,
        }
    }
}
