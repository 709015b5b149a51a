//! Client example walking one customer through the full payment lifecycle
//! against a locally started server.
//!
//! Run with: cargo run -p payments-app --example client_example

use payments_client::PaymentsClient;
use payments_hex::{PaymentService, inbound::HttpServer};
use payments_repo::build_repo;
use payments_types::{
    CreatePaymentMethodRequest, CreatePaymentRequest, CurrencyCode, ListRefundsParams,
    PaymentMethodType,
};
use std::net::SocketAddr;
use tempfile::tempdir;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    let port = addr.port();
    drop(listener);

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("payments.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    println!("🚀 Starting server on port {port}...");
    println!("   Database: {db_url}");

    // Build store (handles connection and migration)
    let repo = build_repo(&db_url).await?;

    // Start server in background
    let server = HttpServer::new(PaymentService::new(repo));
    let server_addr = format!("127.0.0.1:{port}");
    tokio::spawn(async move {
        if let Err(e) = server.run(&server_addr).await {
            eprintln!("server stopped: {e}");
        }
    });

    // Wait for server to start
    tokio::time::sleep(std::time::Duration::from_millis(500)).await;

    let client = PaymentsClient::new(format!("http://127.0.0.1:{port}"));

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: Full payment lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    let health = client.health().await?;
    println!("✅ Server health: {health}");

    let customer = client
        .create_customer("jane@example.com", "Jane Doe")
        .await?;
    println!("✅ Created customer: {} (id={})", customer.name, customer.id);

    let card = client
        .create_payment_method(&CreatePaymentMethodRequest {
            customer_id: customer.id.clone(),
            method_type: PaymentMethodType::Card,
            card_number: "4242424242424242".to_string(),
            exp_month: Some(12),
            exp_year: Some(2030),
            cvc: Some("123".to_string()),
        })
        .await?;
    println!("✅ Added card ending in {} (id={})", card.last4, card.id);

    let payment = client
        .create_payment(&CreatePaymentRequest {
            amount: 2000,
            currency: CurrencyCode::parse("usd")?,
            customer_id: customer.id.clone(),
            payment_method_id: card.id.clone(),
            description: Some("Order #1234".to_string()),
        })
        .await?;
    println!(
        "✅ Payment {} of {} {}: {}",
        payment.id, payment.amount, payment.currency, payment.status
    );

    let refund = client
        .create_refund(&payment.id, 500, Some("requested_by_customer".to_string()))
        .await?;
    println!("✅ Refund {} of {}: {}", refund.id, refund.amount, refund.status);

    // Rejected: the refund is larger than the payment
    match client.create_refund(&payment.id, 5000, None).await {
        Err(e) => println!("✅ Oversized refund rejected: {e}"),
        Ok(r) => anyhow::bail!("oversized refund {} was accepted", r.id),
    }

    let refunds = client
        .list_refunds(&ListRefundsParams {
            payment_id: Some(payment.id.clone()),
            limit: None,
        })
        .await?;
    println!("✅ Payment {} has {} refund(s)", payment.id, refunds.len());

    Ok(())
}
