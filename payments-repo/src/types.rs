//! Database row structs and their conversion into domain entities.
//!
//! SQLite has no native timestamp type, so instants are stored as RFC 3339
//! text with nanosecond precision. That keeps a stored entity equal to the
//! one returned at creation time.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::FromRow;

use payments_types::{
    CurrencyCode, Customer, Payment, PaymentMethod, PaymentMethodType, PaymentStatus, Refund,
    RefundStatus, RepoError,
};

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Customer row from database.
#[derive(FromRow)]
pub struct DbCustomer {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Payment method row from database.
#[derive(FromRow)]
pub struct DbPaymentMethod {
    pub id: String,
    pub customer_id: String,
    #[sqlx(rename = "type")]
    pub method_type: String,
    pub last4: String,
    pub exp_month: Option<i64>,
    pub exp_year: Option<i64>,
    pub brand: String,
    pub created_at: String,
}

/// Payment row from database.
#[derive(FromRow)]
pub struct DbPayment {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub customer_id: String,
    pub payment_method_id: String,
    pub status: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Refund row from database.
#[derive(FromRow)]
pub struct DbRefund {
    pub id: String,
    pub payment_id: String,
    pub amount: i64,
    pub status: String,
    pub reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Timestamp helpers
// ─────────────────────────────────────────────────────────────────────────────

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(raw: &str, column: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepoError::Corrupt(format!("{column} {raw:?}: {e}")))
}

fn parse_column<T>(raw: &str, column: &str) -> Result<T, RepoError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|e: T::Err| RepoError::Corrupt(format!("{column} {raw:?}: {e}")))
}

fn narrow<T: TryFrom<i64>>(value: Option<i64>, column: &str) -> Result<Option<T>, RepoError> {
    value
        .map(|v| {
            T::try_from(v).map_err(|_| RepoError::Corrupt(format!("{column} out of range: {v}")))
        })
        .transpose()
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversions (DB row -> Domain)
// ─────────────────────────────────────────────────────────────────────────────

impl DbCustomer {
    pub fn into_domain(self) -> Result<Customer, RepoError> {
        Ok(Customer {
            id: self.id.into(),
            email: self.email,
            name: self.name,
            created_at: parse_timestamp(&self.created_at, "customers.created_at")?,
            updated_at: parse_timestamp(&self.updated_at, "customers.updated_at")?,
        })
    }
}

impl DbPaymentMethod {
    pub fn into_domain(self) -> Result<PaymentMethod, RepoError> {
        let method_type: PaymentMethodType = parse_column(&self.method_type, "payment_methods.type")?;

        Ok(PaymentMethod {
            id: self.id.into(),
            customer_id: self.customer_id.into(),
            method_type,
            last4: self.last4,
            exp_month: narrow(self.exp_month, "payment_methods.exp_month")?,
            exp_year: narrow(self.exp_year, "payment_methods.exp_year")?,
            brand: self.brand,
            created_at: parse_timestamp(&self.created_at, "payment_methods.created_at")?,
        })
    }
}

impl DbPayment {
    pub fn into_domain(self) -> Result<Payment, RepoError> {
        let currency: CurrencyCode = parse_column(&self.currency, "payments.currency")?;
        let status: PaymentStatus = parse_column(&self.status, "payments.status")?;

        Ok(Payment {
            id: self.id.into(),
            amount: self.amount,
            currency,
            customer_id: self.customer_id.into(),
            payment_method_id: self.payment_method_id.into(),
            status,
            description: self.description,
            created_at: parse_timestamp(&self.created_at, "payments.created_at")?,
            updated_at: parse_timestamp(&self.updated_at, "payments.updated_at")?,
        })
    }
}

impl DbRefund {
    pub fn into_domain(self) -> Result<Refund, RepoError> {
        let status: RefundStatus = parse_column(&self.status, "refunds.status")?;

        Ok(Refund {
            id: self.id.into(),
            payment_id: self.payment_id.into(),
            amount: self.amount,
            status,
            reason: self.reason,
            created_at: parse_timestamp(&self.created_at, "refunds.created_at")?,
            updated_at: parse_timestamp(&self.updated_at, "refunds.updated_at")?,
        })
    }
}
