//! Domain models for the payments records service.

pub mod currency;
pub mod customer;
pub mod ids;
pub mod payment;
pub mod payment_method;
pub mod refund;

pub use currency::CurrencyCode;
pub use customer::Customer;
pub use ids::{CustomerId, IdKind, PaymentId, PaymentMethodId, RefundId};
pub use payment::{Payment, PaymentStatus};
pub use payment_method::{DEFAULT_BRAND, PaymentMethod, PaymentMethodType};
pub use refund::{Refund, RefundStatus};
