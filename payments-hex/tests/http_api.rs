//! HTTP-level tests for the payments API.
//!
//! These drive the full router (handlers, error mapping, JSON shapes) against
//! an in-memory SQLite store.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use payments_hex::{PaymentService, inbound::HttpServer};
use payments_repo::SqliteRepo;
use payments_types::{
    Customer, CustomerId, EntityStore, Payment, PaymentId, PaymentMethod, PaymentMethodId, Refund,
    RefundId, RepoError, SequentialIds,
};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Helper to create a test server with predictable identifiers.
async fn create_test_server() -> HttpServer<SqliteRepo> {
    let repo = SqliteRepo::new("sqlite::memory:").await.unwrap();
    let service = PaymentService::new(repo).with_id_generator(SequentialIds::new());
    HttpServer::new(service)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Sends one request and returns the status with the decoded JSON body.
async fn send<S: EntityStore>(server: &HttpServer<S>, req: Request<Body>) -> (StatusCode, Value) {
    let response = server.router().oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn customer_body(email: &str) -> Value {
    json!({ "email": email, "name": "John Doe" })
}

fn card_body(customer_id: &str) -> Value {
    json!({
        "customer_id": customer_id,
        "type": "card",
        "card_number": "4242424242424242",
        "exp_month": 12,
        "exp_year": 2030,
        "cvc": "123"
    })
}

#[tokio::test]
async fn test_health() {
    let server = create_test_server().await;

    let (status, body) = send(&server, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let server = create_test_server().await;

    let (status, body) = send(&server, get("/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/v1/refunds"].is_object());
}

#[tokio::test]
async fn test_full_lifecycle_over_http() {
    let server = create_test_server().await;

    let (status, customer) = send(
        &server,
        post("/v1/customers", customer_body("user@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(customer["id"], "cus_1");
    assert_eq!(customer["created_at"], customer["updated_at"]);

    let (status, method) = send(&server, post("/v1/payment_methods", card_body("cus_1"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(method["id"], "pm_1");
    assert_eq!(method["type"], "card");
    assert_eq!(method["last4"], "4242");
    assert_eq!(method["brand"], "visa");
    assert!(method.get("card_number").is_none());
    assert!(method.get("cvc").is_none());

    let (status, payment) = send(
        &server,
        post(
            "/v1/payments",
            json!({
                "amount": 2000,
                "currency": "USD",
                "customer_id": "cus_1",
                "payment_method_id": "pm_1",
                "description": "Payment for order #1234"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(payment["id"], "pay_1");
    assert_eq!(payment["status"], "succeeded");
    assert_eq!(payment["currency"], "usd");

    let refund_body = json!({ "payment_id": "pay_1", "amount": 2000, "reason": "duplicate" });
    let (status, refund) = send(&server, post("/v1/refunds", refund_body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(refund["id"], "ref_1");
    assert_eq!(refund["status"], "succeeded");

    let (status, second) = send(&server, post("/v1/refunds", refund_body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["id"], "ref_2");

    let (status, fetched) = send(&server, get("/v1/payments/pay_1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, payment);

    let (status, refunds) = send(&server, get("/v1/refunds?payment_id=pay_1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(refunds["data"], json!([refund, second]));
}

#[tokio::test]
async fn test_get_unknown_entity_is_404() {
    let server = create_test_server().await;

    for uri in [
        "/v1/customers/cus_404",
        "/v1/payment_methods/pm_404",
        "/v1/payments/pay_404",
        "/v1/refunds/ref_404",
    ] {
        let (status, body) = send(&server, get(uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["kind"], "not_found");
        assert_eq!(body["code"], 404);
    }
}

#[tokio::test]
async fn test_unknown_customer_reference_is_400() {
    let server = create_test_server().await;

    let (status, body) = send(&server, post("/v1/payment_methods", card_body("cus_404"))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_reference");

    let (_, list) = send(&server, get("/v1/payment_methods")).await;
    assert_eq!(list["data"], json!([]));
}

#[tokio::test]
async fn test_malformed_requests_are_invalid_argument() {
    let server = create_test_server().await;

    let bad_json = Request::builder()
        .method(Method::POST)
        .uri("/v1/customers")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&server, bad_json).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_argument");

    let (status, body) = send(
        &server,
        post("/v1/customers", customer_body("missing-at-sign")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_argument");

    let (status, body) = send(&server, get("/v1/customers?limit=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_argument");

    let (status, body) = send(&server, get("/v1/customers?limit=0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_argument");
}

#[tokio::test]
async fn test_large_limit_is_passed_through() {
    let server = create_test_server().await;

    let (status, body) = send(&server, get("/v1/customers?limit=500")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, _) = send(
        &server,
        post("/v1/customers", customer_body("user@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&server, get("/v1/refunds?limit=101")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, body) = send(&server, get("/v1/customers?limit=101")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_limit_caps_results() {
    let server = create_test_server().await;
    for i in 0..3 {
        let (status, _) = send(
            &server,
            post("/v1/customers", customer_body(&format!("user{i}@example.com"))),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&server, get("/v1/customers?limit=2")).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["cus_1", "cus_2"]);
}

/// Store whose every call fails, for exercising the 500 path.
struct BrokenStore;

fn broken<T>() -> Result<T, RepoError> {
    Err(RepoError::Database("disk I/O error".into()))
}

#[async_trait]
impl EntityStore for BrokenStore {
    async fn insert_customer(&self, _: &Customer) -> Result<(), RepoError> {
        broken()
    }
    async fn get_customer(&self, _: &CustomerId) -> Result<Option<Customer>, RepoError> {
        broken()
    }
    async fn list_customers(&self, _: u32) -> Result<Vec<Customer>, RepoError> {
        broken()
    }
    async fn insert_payment_method(&self, _: &PaymentMethod) -> Result<(), RepoError> {
        broken()
    }
    async fn get_payment_method(
        &self,
        _: &PaymentMethodId,
    ) -> Result<Option<PaymentMethod>, RepoError> {
        broken()
    }
    async fn list_payment_methods(
        &self,
        _: Option<&CustomerId>,
        _: u32,
    ) -> Result<Vec<PaymentMethod>, RepoError> {
        broken()
    }
    async fn insert_payment(&self, _: &Payment) -> Result<(), RepoError> {
        broken()
    }
    async fn get_payment(&self, _: &PaymentId) -> Result<Option<Payment>, RepoError> {
        broken()
    }
    async fn list_payments(
        &self,
        _: Option<&CustomerId>,
        _: u32,
    ) -> Result<Vec<Payment>, RepoError> {
        broken()
    }
    async fn insert_refund(&self, _: &Refund) -> Result<(), RepoError> {
        broken()
    }
    async fn get_refund(&self, _: &RefundId) -> Result<Option<Refund>, RepoError> {
        broken()
    }
    async fn list_refunds(&self, _: Option<&PaymentId>, _: u32) -> Result<Vec<Refund>, RepoError> {
        broken()
    }
}

#[tokio::test]
async fn test_store_failure_is_500_unavailable() {
    let server = HttpServer::new(PaymentService::new(BrokenStore));

    let (status, body) = send(
        &server,
        post("/v1/customers", customer_body("user@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], "unavailable");

    let (status, body) = send(&server, get("/v1/payments/pay_1")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], "unavailable");
}
