//! PaymentMethod domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::{CustomerId, PaymentMethodId};
use crate::error::DomainError;
use crate::validation::validate_account_details;

/// Brand recorded on every payment method.
///
/// Not derived from the number; there is no card-network lookup.
pub const DEFAULT_BRAND: &str = "visa";

/// Kind of payment instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodType {
    Card,
    BankAccount,
}

impl PaymentMethodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethodType::Card => "card",
            PaymentMethodType::BankAccount => "bank_account",
        }
    }
}

impl std::fmt::Display for PaymentMethodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMethodType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(PaymentMethodType::Card),
            "bank_account" => Ok(PaymentMethodType::BankAccount),
            other => Err(DomainError::ValidationError(format!(
                "Unknown payment method type: {}",
                other
            ))),
        }
    }
}

/// A stored payment instrument belonging to one customer.
///
/// Only the last four digits of the number are ever kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaymentMethod {
    /// Unique identifier
    pub id: PaymentMethodId,
    /// Customer this payment method belongs to
    pub customer_id: CustomerId,
    /// Type of payment method
    #[serde(rename = "type")]
    pub method_type: PaymentMethodType,
    /// Last 4 digits of the card or bank account
    #[schema(example = "4242")]
    pub last4: String,
    /// Expiration month (cards only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 12)]
    pub exp_month: Option<u32>,
    /// Expiration year (cards only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 2025)]
    pub exp_year: Option<i32>,
    /// Card brand
    #[schema(example = "visa")]
    pub brand: String,
    /// When the payment method was created
    pub created_at: DateTime<Utc>,
}

impl PaymentMethod {
    /// Creates a new payment method from the full account number.
    ///
    /// The number is validated and discarded; only `last4` survives.
    pub fn new(
        id: PaymentMethodId,
        customer_id: CustomerId,
        method_type: PaymentMethodType,
        number: &str,
        exp_month: Option<u32>,
        exp_year: Option<i32>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_account_details(method_type, number, exp_month, exp_year)?;

        let number = number.trim();
        let last4 = number[number.len() - 4..].to_string();

        Ok(Self {
            id,
            customer_id,
            method_type,
            last4,
            exp_month,
            exp_year,
            brand: DEFAULT_BRAND.to_string(),
            created_at: now,
        })
    }
}
