//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use payments_types::domain::{
    CurrencyCode, Customer, CustomerId, Payment, PaymentId, PaymentMethod, PaymentMethodId,
    PaymentMethodType, PaymentStatus, Refund, RefundId, RefundStatus,
};
use payments_types::dto::{
    CreateCustomerRequest, CreatePaymentMethodRequest, CreatePaymentRequest, CreateRefundRequest,
    ListCustomersParams, ListPaymentMethodsParams, ListPaymentsParams, ListRefundsParams,
    ListResponse,
};
use payments_types::error::ErrorKind;
use utoipa::OpenApi;

use crate::inbound::handlers::ErrorResponse;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

// ─────────────────────────────────────────────────────────────────────────────
// Customers
// ─────────────────────────────────────────────────────────────────────────────

/// Create a customer
#[utoipa::path(
    post,
    path = "/v1/customers",
    tag = "customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, description = "Invalid email or name", body = ErrorResponse),
        (status = 500, description = "Store unavailable", body = ErrorResponse)
    )
)]
async fn create_customer() {}

/// List customers in creation order
#[utoipa::path(
    get,
    path = "/v1/customers",
    tag = "customers",
    params(ListCustomersParams),
    responses(
        (status = 200, description = "Page of customers", body = ListResponse<Customer>),
        (status = 400, description = "Zero or malformed limit", body = ErrorResponse)
    )
)]
async fn list_customers() {}

/// Get customer by ID
#[utoipa::path(
    get,
    path = "/v1/customers/{id}",
    tag = "customers",
    params(("id" = String, Path, description = "Customer ID", example = "cus_1")),
    responses(
        (status = 200, description = "Customer details", body = Customer),
        (status = 404, description = "Customer not found", body = ErrorResponse)
    )
)]
async fn get_customer() {}

// ─────────────────────────────────────────────────────────────────────────────
// Payment methods
// ─────────────────────────────────────────────────────────────────────────────

/// Attach a payment method to a customer
#[utoipa::path(
    post,
    path = "/v1/payment_methods",
    tag = "payment_methods",
    request_body = CreatePaymentMethodRequest,
    responses(
        (status = 201, description = "Payment method created", body = PaymentMethod),
        (status = 400, description = "Invalid card details or unknown customer", body = ErrorResponse),
        (status = 500, description = "Store unavailable", body = ErrorResponse)
    )
)]
async fn create_payment_method() {}

/// List payment methods
#[utoipa::path(
    get,
    path = "/v1/payment_methods",
    tag = "payment_methods",
    params(ListPaymentMethodsParams),
    responses(
        (status = 200, description = "Page of payment methods", body = ListResponse<PaymentMethod>),
        (status = 400, description = "Zero or malformed limit", body = ErrorResponse)
    )
)]
async fn list_payment_methods() {}

/// Get payment method by ID
#[utoipa::path(
    get,
    path = "/v1/payment_methods/{id}",
    tag = "payment_methods",
    params(("id" = String, Path, description = "Payment method ID", example = "pm_1")),
    responses(
        (status = 200, description = "Payment method details", body = PaymentMethod),
        (status = 404, description = "Payment method not found", body = ErrorResponse)
    )
)]
async fn get_payment_method() {}

// ─────────────────────────────────────────────────────────────────────────────
// Payments
// ─────────────────────────────────────────────────────────────────────────────

/// Record a payment
#[utoipa::path(
    post,
    path = "/v1/payments",
    tag = "payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment recorded", body = Payment),
        (status = 400, description = "Invalid amount, unknown reference or foreign payment method", body = ErrorResponse),
        (status = 500, description = "Store unavailable", body = ErrorResponse)
    )
)]
async fn create_payment() {}

/// List payments
#[utoipa::path(
    get,
    path = "/v1/payments",
    tag = "payments",
    params(ListPaymentsParams),
    responses(
        (status = 200, description = "Page of payments", body = ListResponse<Payment>),
        (status = 400, description = "Zero or malformed limit", body = ErrorResponse)
    )
)]
async fn list_payments() {}

/// Get payment by ID
#[utoipa::path(
    get,
    path = "/v1/payments/{id}",
    tag = "payments",
    params(("id" = String, Path, description = "Payment ID", example = "pay_1")),
    responses(
        (status = 200, description = "Payment details", body = Payment),
        (status = 404, description = "Payment not found", body = ErrorResponse)
    )
)]
async fn get_payment() {}

// ─────────────────────────────────────────────────────────────────────────────
// Refunds
// ─────────────────────────────────────────────────────────────────────────────

/// Refund a succeeded payment
#[utoipa::path(
    post,
    path = "/v1/refunds",
    tag = "refunds",
    request_body = CreateRefundRequest,
    responses(
        (status = 201, description = "Refund recorded", body = Refund),
        (status = 400, description = "Unknown or unrefundable payment, or amount too large", body = ErrorResponse),
        (status = 500, description = "Store unavailable", body = ErrorResponse)
    )
)]
async fn create_refund() {}

/// List refunds
#[utoipa::path(
    get,
    path = "/v1/refunds",
    tag = "refunds",
    params(ListRefundsParams),
    responses(
        (status = 200, description = "Page of refunds", body = ListResponse<Refund>),
        (status = 400, description = "Zero or malformed limit", body = ErrorResponse)
    )
)]
async fn list_refunds() {}

/// Get refund by ID
#[utoipa::path(
    get,
    path = "/v1/refunds/{id}",
    tag = "refunds",
    params(("id" = String, Path, description = "Refund ID", example = "ref_1")),
    responses(
        (status = 200, description = "Refund details", body = Refund),
        (status = 404, description = "Refund not found", body = ErrorResponse)
    )
)]
async fn get_refund() {}

/// OpenAPI documentation for the Payments API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payments Records API",
        version = "1.0.0",
        description = "Records customers, their payment methods, payments and refunds.\n\nAmounts are integers in minor currency units. Errors carry a `kind` of `invalid_argument`, `invalid_reference`, `invalid_state`, `not_found` or `unavailable`.",
        license(name = "MIT"),
    ),
    paths(
        health,
        create_customer,
        list_customers,
        get_customer,
        create_payment_method,
        list_payment_methods,
        get_payment_method,
        create_payment,
        list_payments,
        get_payment,
        create_refund,
        list_refunds,
        get_refund,
    ),
    components(
        schemas(
            Customer,
            CustomerId,
            PaymentMethod,
            PaymentMethodId,
            PaymentMethodType,
            Payment,
            PaymentId,
            PaymentStatus,
            Refund,
            RefundId,
            RefundStatus,
            CurrencyCode,
            CreateCustomerRequest,
            CreatePaymentMethodRequest,
            CreatePaymentRequest,
            CreateRefundRequest,
            ErrorKind,
            ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "customers", description = "Customer records"),
        (name = "payment_methods", description = "Stored payment instruments"),
        (name = "payments", description = "Recorded charges"),
        (name = "refunds", description = "Refunds of succeeded payments"),
    )
)]
pub struct ApiDoc;
