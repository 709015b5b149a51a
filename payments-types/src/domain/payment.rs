//! Payment domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::currency::CurrencyCode;
use super::ids::{CustomerId, PaymentId, PaymentMethodId};
use crate::error::DomainError;
use crate::validation::validate_positive_amount;

/// Outcome of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Succeeded,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "succeeded" => Ok(PaymentStatus::Succeeded),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(DomainError::ValidationError(format!(
                "Unknown payment status: {}",
                other
            ))),
        }
    }
}

/// A recorded charge of a customer's payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// Amount in minor currency units (e.g. cents)
    #[schema(example = 2000)]
    pub amount: i64,
    /// Three-letter currency code
    pub currency: CurrencyCode,
    /// Customer making the payment
    pub customer_id: CustomerId,
    /// Payment method used; always owned by `customer_id`
    pub payment_method_id: PaymentMethodId,
    /// Status of the payment
    pub status: PaymentStatus,
    /// What the payment is for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Payment for order #1234")]
    pub description: Option<String>,
    /// When the payment was created
    pub created_at: DateTime<Utc>,
    /// When the payment was last updated
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a payment in the `pending` state.
    ///
    /// The lifecycle operation settles the final status before persisting.
    pub fn pending(
        id: PaymentId,
        amount: i64,
        currency: CurrencyCode,
        customer_id: CustomerId,
        payment_method_id: PaymentMethodId,
        description: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_positive_amount(amount)?;

        Ok(Self {
            id,
            amount,
            currency,
            customer_id,
            payment_method_id,
            status: PaymentStatus::Pending,
            description: description.filter(|d| !d.trim().is_empty()),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_refundable(&self) -> bool {
        self.status == PaymentStatus::Succeeded
    }
}
