//! Prefixed, opaque entity identifiers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The entity kinds that receive generated identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    Customer,
    PaymentMethod,
    Payment,
    Refund,
}

impl IdKind {
    /// Human-readable prefix placed before the unique suffix.
    pub fn prefix(&self) -> &'static str {
        match self {
            IdKind::Customer => "cus",
            IdKind::PaymentMethod => "pm",
            IdKind::Payment => "pay",
            IdKind::Refund => "ref",
        }
    }

    /// Formats a full identifier from a suffix.
    pub fn format(&self, suffix: impl std::fmt::Display) -> String {
        format!("{}_{}", self.prefix(), suffix)
    }
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub const KIND: IdKind = $kind;

            /// Wraps an existing identifier string (e.g. from a request or a row).
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a Customer (`cus_...`).
    CustomerId,
    IdKind::Customer
);
entity_id!(
    /// Unique identifier for a PaymentMethod (`pm_...`).
    PaymentMethodId,
    IdKind::PaymentMethod
);
entity_id!(
    /// Unique identifier for a Payment (`pay_...`).
    PaymentId,
    IdKind::Payment
);
entity_id!(
    /// Unique identifier for a Refund (`ref_...`).
    RefundId,
    IdKind::Refund
);
