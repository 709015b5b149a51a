//! # Payments Types
//!
//! Domain types, validation rules and port traits for the payments
//! records service. This crate has ZERO IO dependencies - only data
//! structures, business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Entities (Customer, PaymentMethod, Payment, Refund) and identifiers
//! - `validation` - Cross-entity rules checked before any write
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain, repository and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;
pub mod validation;

// Re-export commonly used types
pub use domain::{
    CurrencyCode, Customer, CustomerId, IdKind, Payment, PaymentId, PaymentMethod,
    PaymentMethodId, PaymentMethodType, PaymentStatus, Refund, RefundId, RefundStatus,
};
pub use dto::*;
pub use error::{AppError, DomainError, ErrorKind, RepoError};
pub use ports::{
    AlwaysSucceeds, EntityStore, IdGenerator, OutcomeResolver, SequentialIds, TimeOrderedIds,
};
