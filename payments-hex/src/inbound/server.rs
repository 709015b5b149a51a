//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use payments_types::EntityStore;

use super::handlers::{self, AppState};
use crate::PaymentService;

/// HTTP Server for the Payments API.
pub struct HttpServer<S: EntityStore> {
    state: Arc<AppState<S>>,
}

impl<S: EntityStore> HttpServer<S> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: PaymentService<S>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/openapi.json", get(handlers::openapi_json))
            .route(
                "/v1/customers",
                get(handlers::list_customers::<S>).post(handlers::create_customer::<S>),
            )
            .route("/v1/customers/{id}", get(handlers::get_customer::<S>))
            .route(
                "/v1/payment_methods",
                get(handlers::list_payment_methods::<S>)
                    .post(handlers::create_payment_method::<S>),
            )
            .route(
                "/v1/payment_methods/{id}",
                get(handlers::get_payment_method::<S>),
            )
            .route(
                "/v1/payments",
                get(handlers::list_payments::<S>).post(handlers::create_payment::<S>),
            )
            .route("/v1/payments/{id}", get(handlers::get_payment::<S>))
            .route(
                "/v1/refunds",
                get(handlers::list_refunds::<S>).post(handlers::create_refund::<S>),
            )
            .route("/v1/refunds/{id}", get(handlers::get_refund::<S>))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
