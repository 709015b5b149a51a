//! Customer domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::CustomerId;
use crate::error::DomainError;
use crate::validation::{validate_email, validate_name};

/// A customer who owns payment methods and makes payments.
///
/// Customers are never mutated or deleted once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    /// Unique identifier
    pub id: CustomerId,
    /// Email address of the customer
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Customer's full name
    #[schema(example = "John Doe")]
    pub name: String,
    /// When the customer was created
    pub created_at: DateTime<Utc>,
    /// When the customer was last updated
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Creates a new customer.
    ///
    /// # Validation
    /// - Email must be well-formed
    /// - Name cannot be empty
    pub fn new(
        id: CustomerId,
        email: String,
        name: String,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_email(&email)?;
        validate_name(&name)?;

        Ok(Self {
            id,
            email: email.trim().to_string(),
            name: name.trim().to_string(),
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_creation() {
        let now = Utc::now();
        let customer = Customer::new(
            CustomerId::new("cus_1"),
            "a@b.com".to_string(),
            "A".to_string(),
            now,
        )
        .unwrap();

        assert_eq!(customer.id.as_str(), "cus_1");
        assert_eq!(customer.created_at, customer.updated_at);
    }

    #[test]
    fn test_empty_name_fails() {
        let result = Customer::new(
            CustomerId::new("cus_1"),
            "a@b.com".to_string(),
            "  ".to_string(),
            Utc::now(),
        );
        assert!(matches!(result, Err(DomainError::EmptyName)));
    }

    #[test]
    fn test_bad_email_fails() {
        let result = Customer::new(
            CustomerId::new("cus_1"),
            "not-an-email".to_string(),
            "A".to_string(),
            Utc::now(),
        );
        assert!(matches!(result, Err(DomainError::InvalidEmail(_))));
    }
}
