//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{CurrencyCode, CustomerId, PaymentId, PaymentMethodId, PaymentMethodType};

// ─────────────────────────────────────────────────────────────────────────────
// Customer DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a new customer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCustomerRequest {
    /// Customer's email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Customer's full name
    #[schema(example = "John Doe")]
    pub name: String,
}

/// Query parameters for listing customers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCustomersParams {
    /// Maximum number of customers to return (default 10)
    pub limit: Option<u32>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment method DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to attach a payment method to a customer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentMethodRequest {
    /// Customer the payment method belongs to
    pub customer_id: CustomerId,
    /// Type of payment method
    #[serde(rename = "type")]
    pub method_type: PaymentMethodType,
    /// Full card or bank account number; only the last four digits are kept
    #[schema(example = "4242424242424242")]
    pub card_number: String,
    /// Expiration month (cards only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 12)]
    pub exp_month: Option<u32>,
    /// Expiration year (cards only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 2025)]
    pub exp_year: Option<i32>,
    /// Card security code; checked for shape, never stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "123")]
    pub cvc: Option<String>,
}

/// Query parameters for listing payment methods.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPaymentMethodsParams {
    /// Only return payment methods of this customer
    pub customer_id: Option<CustomerId>,
    /// Maximum number of payment methods to return (default 10)
    pub limit: Option<u32>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to record a payment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentRequest {
    /// Amount in minor currency units (e.g. cents)
    #[schema(example = 2000)]
    pub amount: i64,
    /// Three-letter currency code
    pub currency: CurrencyCode,
    /// Customer making the payment
    pub customer_id: CustomerId,
    /// Payment method to charge; must belong to `customer_id`
    pub payment_method_id: PaymentMethodId,
    /// What the payment is for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Payment for order #1234")]
    pub description: Option<String>,
}

/// Query parameters for listing payments.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPaymentsParams {
    /// Only return payments made by this customer
    pub customer_id: Option<CustomerId>,
    /// Maximum number of payments to return (default 10)
    pub limit: Option<u32>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Refund DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to refund (part of) a payment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateRefundRequest {
    /// Payment to refund
    pub payment_id: PaymentId,
    /// Amount to refund in minor currency units
    #[schema(example = 2000)]
    pub amount: i64,
    /// Reason for the refund
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "requested_by_customer")]
    pub reason: Option<String>,
}

/// Query parameters for listing refunds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListRefundsParams {
    /// Only return refunds of this payment
    pub payment_id: Option<PaymentId>,
    /// Maximum number of refunds to return (default 10)
    pub limit: Option<u32>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Responses
// ─────────────────────────────────────────────────────────────────────────────

/// A page of entities, in creation order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}
