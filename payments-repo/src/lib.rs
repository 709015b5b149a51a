//! # Payments Repository
//!
//! Concrete store implementations (adapters) for the payments service.
//! This crate provides the SQLite adapter that implements the `EntityStore` port.

pub mod sqlite;

mod types;


pub use sqlite::SqliteRepo;

/// Build and initialize a store from a database URL.
///
/// This function:
/// 1. Connects to the database, creating the file if needed
/// 2. Runs migrations to create tables
/// 3. Returns a ready-to-use `SqliteRepo`
///
/// # Examples
///
/// ```ignore
/// let repo = build_repo("sqlite://payments.db?mode=rwc").await?;
/// let scratch = build_repo("sqlite::memory:").await?;
/// ```
pub async fn build_repo(database_url: &str) -> anyhow::Result<SqliteRepo> {
    SqliteRepo::new(database_url).await
}
