//! # Payments Hex
//!
//! Application service layer and HTTP adapter for the payments records service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates domain operations)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi` - Generated OpenAPI document served at `/openapi.json`
//!
//! The service is generic over `S: EntityStore`, allowing
//! different store implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::PaymentService;
