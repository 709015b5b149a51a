//! SQLite entity store adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use payments_types::{
    Customer, CustomerId, EntityStore, Payment, PaymentId, PaymentMethod, PaymentMethodId,
    Refund, RefundId, RepoError,
};

use crate::types::{DbCustomer, DbPayment, DbPaymentMethod, DbRefund, format_timestamp};

const MIGRATION: &str = include_str!("../migrations/0001_create_tables.sql");

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite store implementation.
///
/// Every list is returned in insertion order (`rowid`), which is creation
/// order because rows are never rewritten.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Opens (or creates) the database and runs the migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let in_memory = is_in_memory(database_url);

        // Ensure on-disk SQLite target directory exists.
        if !in_memory {
            if let Some(path) = database_url.strip_prefix("sqlite://") {
                let path = path.split('?').next().unwrap_or(path);
                if let Some(parent) = std::path::Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // An in-memory database lives and dies with its connection.
        let pool = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new().connect_with(options).await?
        };

        let repo = Self { pool };
        repo.create_schema().await?;

        tracing::debug!(in_memory, "SQLite store ready");
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema. Safe to run against an existing database.
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        sqlx::raw_sql(MIGRATION)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn db_error(err: sqlx::Error) -> RepoError {
    RepoError::Database(err.to_string())
}

fn insert_error(err: sqlx::Error, what: &str, id: &str) -> RepoError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepoError::Conflict(format!("{what} {id} already exists"))
        }
        _ => db_error(err),
    }
}

fn limit_param(limit: u32) -> i64 {
    i64::from(limit)
}

// ─────────────────────────────────────────────────────────────────────────────
// Store implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl EntityStore for SqliteRepo {
    async fn insert_customer(&self, customer: &Customer) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO customers (id, email, name, created_at, updated_at) VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(customer.id.as_str())
        .bind(&customer.email)
        .bind(&customer.name)
        .bind(format_timestamp(customer.created_at))
        .bind(format_timestamp(customer.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(e, "Customer", customer.id.as_str()))?;

        Ok(())
    }

    async fn get_customer(&self, id: &CustomerId) -> Result<Option<Customer>, RepoError> {
        let row: Option<DbCustomer> = sqlx::query_as(
            r#"SELECT id, email, name, created_at, updated_at FROM customers WHERE id = ?"#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(DbCustomer::into_domain).transpose()
    }

    async fn list_customers(&self, limit: u32) -> Result<Vec<Customer>, RepoError> {
        let rows: Vec<DbCustomer> = sqlx::query_as(
            r#"SELECT id, email, name, created_at, updated_at FROM customers ORDER BY rowid ASC LIMIT ?"#,
        )
        .bind(limit_param(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(DbCustomer::into_domain).collect()
    }

    async fn insert_payment_method(&self, method: &PaymentMethod) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO payment_methods (id, customer_id, type, last4, exp_month, exp_year, brand, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(method.id.as_str())
        .bind(method.customer_id.as_str())
        .bind(method.method_type.as_str())
        .bind(&method.last4)
        .bind(method.exp_month.map(i64::from))
        .bind(method.exp_year.map(i64::from))
        .bind(&method.brand)
        .bind(format_timestamp(method.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(e, "Payment method", method.id.as_str()))?;

        Ok(())
    }

    async fn get_payment_method(
        &self,
        id: &PaymentMethodId,
    ) -> Result<Option<PaymentMethod>, RepoError> {
        let row: Option<DbPaymentMethod> = sqlx::query_as(
            r#"
            SELECT id, customer_id, type, last4, exp_month, exp_year, brand, created_at
            FROM payment_methods WHERE id = ?
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(DbPaymentMethod::into_domain).transpose()
    }

    async fn list_payment_methods(
        &self,
        customer_id: Option<&CustomerId>,
        limit: u32,
    ) -> Result<Vec<PaymentMethod>, RepoError> {
        let rows: Vec<DbPaymentMethod> = sqlx::query_as(
            r#"
            SELECT id, customer_id, type, last4, exp_month, exp_year, brand, created_at
            FROM payment_methods
            WHERE (?1 IS NULL OR customer_id = ?1)
            ORDER BY rowid ASC
            LIMIT ?2
            "#,
        )
        .bind(customer_id.map(CustomerId::as_str))
        .bind(limit_param(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(DbPaymentMethod::into_domain).collect()
    }

    async fn insert_payment(&self, payment: &Payment) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO payments (id, amount, currency, customer_id, payment_method_id, status, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(payment.id.as_str())
        .bind(payment.amount)
        .bind(payment.currency.as_str())
        .bind(payment.customer_id.as_str())
        .bind(payment.payment_method_id.as_str())
        .bind(payment.status.as_str())
        .bind(payment.description.as_deref())
        .bind(format_timestamp(payment.created_at))
        .bind(format_timestamp(payment.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(e, "Payment", payment.id.as_str()))?;

        Ok(())
    }

    async fn get_payment(&self, id: &PaymentId) -> Result<Option<Payment>, RepoError> {
        let row: Option<DbPayment> = sqlx::query_as(
            r#"
            SELECT id, amount, currency, customer_id, payment_method_id, status, description, created_at, updated_at
            FROM payments WHERE id = ?
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(DbPayment::into_domain).transpose()
    }

    async fn list_payments(
        &self,
        customer_id: Option<&CustomerId>,
        limit: u32,
    ) -> Result<Vec<Payment>, RepoError> {
        let rows: Vec<DbPayment> = sqlx::query_as(
            r#"
            SELECT id, amount, currency, customer_id, payment_method_id, status, description, created_at, updated_at
            FROM payments
            WHERE (?1 IS NULL OR customer_id = ?1)
            ORDER BY rowid ASC
            LIMIT ?2
            "#,
        )
        .bind(customer_id.map(CustomerId::as_str))
        .bind(limit_param(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(DbPayment::into_domain).collect()
    }

    async fn insert_refund(&self, refund: &Refund) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO refunds (id, payment_id, amount, status, reason, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(refund.id.as_str())
        .bind(refund.payment_id.as_str())
        .bind(refund.amount)
        .bind(refund.status.as_str())
        .bind(refund.reason.as_deref())
        .bind(format_timestamp(refund.created_at))
        .bind(format_timestamp(refund.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(e, "Refund", refund.id.as_str()))?;

        Ok(())
    }

    async fn get_refund(&self, id: &RefundId) -> Result<Option<Refund>, RepoError> {
        let row: Option<DbRefund> = sqlx::query_as(
            r#"
            SELECT id, payment_id, amount, status, reason, created_at, updated_at
            FROM refunds WHERE id = ?
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(DbRefund::into_domain).transpose()
    }

    async fn list_refunds(
        &self,
        payment_id: Option<&PaymentId>,
        limit: u32,
    ) -> Result<Vec<Refund>, RepoError> {
        let rows: Vec<DbRefund> = sqlx::query_as(
            r#"
            SELECT id, payment_id, amount, status, reason, created_at, updated_at
            FROM refunds
            WHERE (?1 IS NULL OR payment_id = ?1)
            ORDER BY rowid ASC
            LIMIT ?2
            "#,
        )
        .bind(payment_id.map(PaymentId::as_str))
        .bind(limit_param(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(DbRefund::into_domain).collect()
    }
}
