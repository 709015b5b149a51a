//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use payments_types::{
    AppError, CreateCustomerRequest, CreatePaymentMethodRequest, CreatePaymentRequest,
    CreateRefundRequest, CustomerId, EntityStore, ErrorKind, ListCustomersParams,
    ListPaymentMethodsParams, ListPaymentsParams, ListRefundsParams, ListResponse, PaymentId,
    PaymentMethodId, RefundId,
};

use crate::PaymentService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<S: EntityStore> {
    pub service: PaymentService<S>,
}

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Machine-readable classification
    pub kind: ErrorKind,
    /// HTTP status code, repeated for clients that only see the body
    #[schema(example = 400)]
    pub code: u16,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(AppError::InvalidArgument(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(AppError::InvalidArgument(rejection.body_text()))
    }
}

pub(crate) fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidArgument | ErrorKind::InvalidReference | ErrorKind::InvalidState => {
            StatusCode::BAD_REQUEST
        }
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Unavailable => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.0.kind();
        let status = status_for(kind);

        if status.is_server_error() {
            tracing::error!(error = ?self.0, "Request failed");
        } else {
            tracing::warn!(%kind, message = self.0.message(), "Request rejected");
        }

        let body = ErrorResponse {
            error: self.0.message().to_string(),
            kind,
            code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Serves the generated OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

// ─────────────────────────────────────────────────────────────────────────────
// Customers
// ─────────────────────────────────────────────────────────────────────────────

/// Create a customer.
#[tracing::instrument(skip_all)]
pub async fn create_customer<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CreateCustomerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let customer = state.service.create_customer(req).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// Get customer by ID.
#[tracing::instrument(skip(state), fields(customer_id = %id))]
pub async fn get_customer<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = state.service.get_customer(&CustomerId::new(id)).await?;
    Ok(Json(customer))
}

/// List customers.
#[tracing::instrument(skip_all)]
pub async fn list_customers<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    params: Result<Query<ListCustomersParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let customers = state.service.list_customers(params).await?;
    Ok(Json(ListResponse::from(customers)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment methods
// ─────────────────────────────────────────────────────────────────────────────

/// Create a payment method. The request body carries a full account number
/// and is never logged.
#[tracing::instrument(skip_all)]
pub async fn create_payment_method<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CreatePaymentMethodRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let method = state.service.create_payment_method(req).await?;
    Ok((StatusCode::CREATED, Json(method)))
}

/// Get payment method by ID.
#[tracing::instrument(skip(state), fields(payment_method_id = %id))]
pub async fn get_payment_method<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let method = state
        .service
        .get_payment_method(&PaymentMethodId::new(id))
        .await?;
    Ok(Json(method))
}

/// List payment methods.
#[tracing::instrument(skip_all)]
pub async fn list_payment_methods<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    params: Result<Query<ListPaymentMethodsParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let methods = state.service.list_payment_methods(params).await?;
    Ok(Json(ListResponse::from(methods)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Payments
// ─────────────────────────────────────────────────────────────────────────────

/// Create a payment.
#[tracing::instrument(skip_all)]
pub async fn create_payment<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CreatePaymentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let payment = state.service.create_payment(req).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

/// Get payment by ID.
#[tracing::instrument(skip(state), fields(payment_id = %id))]
pub async fn get_payment<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state.service.get_payment(&PaymentId::new(id)).await?;
    Ok(Json(payment))
}

/// List payments.
#[tracing::instrument(skip_all)]
pub async fn list_payments<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    params: Result<Query<ListPaymentsParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let payments = state.service.list_payments(params).await?;
    Ok(Json(ListResponse::from(payments)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Refunds
// ─────────────────────────────────────────────────────────────────────────────

/// Create a refund.
#[tracing::instrument(skip_all)]
pub async fn create_refund<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CreateRefundRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let refund = state.service.create_refund(req).await?;
    Ok((StatusCode::CREATED, Json(refund)))
}

/// Get refund by ID.
#[tracing::instrument(skip(state), fields(refund_id = %id))]
pub async fn get_refund<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let refund = state.service.get_refund(&RefundId::new(id)).await?;
    Ok(Json(refund))
}

/// List refunds.
#[tracing::instrument(skip_all)]
pub async fn list_refunds<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    params: Result<Query<ListRefundsParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let refunds = state.service.list_refunds(params).await?;
    Ok(Json(ListResponse::from(refunds)))
}
