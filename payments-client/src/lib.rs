//! # Payments Client SDK
//!
//! A typed Rust client for the Payments API.

use payments_types::{
    CreateCustomerRequest, CreatePaymentMethodRequest, CreatePaymentRequest, CreateRefundRequest,
    Customer, CustomerId, ErrorKind, ListCustomersParams, ListPaymentMethodsParams,
    ListPaymentsParams, ListRefundsParams, ListResponse, Payment, PaymentId, PaymentMethod,
    PaymentMethodId, Refund, RefundId,
};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api {
        status: u16,
        /// Present when the server sent a structured error body.
        kind: Option<ErrorKind>,
        message: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// The server-side error classification, if this is an API error.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ClientError::Api { kind, .. } => *kind,
            _ => None,
        }
    }
}

/// Payments API client.
pub struct PaymentsClient {
    base_url: String,
    http: Client,
}

impl PaymentsClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Customers
    // ─────────────────────────────────────────────────────────────────────────

    /// Creates a new customer.
    pub async fn create_customer(&self, email: &str, name: &str) -> Result<Customer, ClientError> {
        let req = CreateCustomerRequest {
            email: email.to_string(),
            name: name.to_string(),
        };
        self.post("/v1/customers", &req).await
    }

    /// Gets a customer by ID.
    pub async fn get_customer(&self, id: &CustomerId) -> Result<Customer, ClientError> {
        self.get(&format!("/v1/customers/{}", id)).await
    }

    /// Lists customers in creation order.
    pub async fn list_customers(
        &self,
        params: &ListCustomersParams,
    ) -> Result<Vec<Customer>, ClientError> {
        let page: ListResponse<Customer> = self.get_with_query("/v1/customers", params).await?;
        Ok(page.data)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Payment methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Attaches a payment method to a customer.
    pub async fn create_payment_method(
        &self,
        req: &CreatePaymentMethodRequest,
    ) -> Result<PaymentMethod, ClientError> {
        self.post("/v1/payment_methods", req).await
    }

    /// Gets a payment method by ID.
    pub async fn get_payment_method(
        &self,
        id: &PaymentMethodId,
    ) -> Result<PaymentMethod, ClientError> {
        self.get(&format!("/v1/payment_methods/{}", id)).await
    }

    /// Lists payment methods, optionally for one customer.
    pub async fn list_payment_methods(
        &self,
        params: &ListPaymentMethodsParams,
    ) -> Result<Vec<PaymentMethod>, ClientError> {
        let page: ListResponse<PaymentMethod> =
            self.get_with_query("/v1/payment_methods", params).await?;
        Ok(page.data)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Payments
    // ─────────────────────────────────────────────────────────────────────────

    /// Records a payment.
    pub async fn create_payment(&self, req: &CreatePaymentRequest) -> Result<Payment, ClientError> {
        self.post("/v1/payments", req).await
    }

    /// Gets a payment by ID.
    pub async fn get_payment(&self, id: &PaymentId) -> Result<Payment, ClientError> {
        self.get(&format!("/v1/payments/{}", id)).await
    }

    /// Lists payments, optionally for one customer.
    pub async fn list_payments(
        &self,
        params: &ListPaymentsParams,
    ) -> Result<Vec<Payment>, ClientError> {
        let page: ListResponse<Payment> = self.get_with_query("/v1/payments", params).await?;
        Ok(page.data)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Refunds
    // ─────────────────────────────────────────────────────────────────────────

    /// Refunds (part of) a payment.
    pub async fn create_refund(
        &self,
        payment_id: &PaymentId,
        amount: i64,
        reason: Option<String>,
    ) -> Result<Refund, ClientError> {
        let req = CreateRefundRequest {
            payment_id: payment_id.clone(),
            amount,
            reason,
        };
        self.post("/v1/refunds", &req).await
    }

    /// Gets a refund by ID.
    pub async fn get_refund(&self, id: &RefundId) -> Result<Refund, ClientError> {
        self.get(&format!("/v1/refunds/{}", id)).await
    }

    /// Lists refunds, optionally for one payment.
    pub async fn list_refunds(&self, params: &ListRefundsParams) -> Result<Vec<Refund>, ClientError> {
        let page: ListResponse<Refund> = self.get_with_query("/v1/refunds", params).await?;
        Ok(page.data)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn get_with_query<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        let body = resp.text().await?;
        if status.is_success() {
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(api_error(status.as_u16(), body))
        }
    }
}

/// Decodes an error body, falling back to the raw text when it is not the
/// service's JSON error shape.
fn api_error(status: u16, body: String) -> ClientError {
    let parsed = serde_json::from_str::<serde_json::Value>(&body).ok();
    let field = |name: &str| parsed.as_ref().and_then(|v| v.get(name)).cloned();

    let kind = field("kind").and_then(|k| serde_json::from_value(k).ok());
    let message = field("error")
        .and_then(|e| e.as_str().map(String::from))
        .unwrap_or(body);

    ClientError::Api {
        status,
        kind,
        message,
    }
}
