//! Domain validation.
//!
//! Two families of pure, deterministic checks live here:
//!
//! - **Input rules** on a single request field (email, name, amount, account
//!   number, list limit). They return [`DomainError`], which surfaces as
//!   `InvalidArgument`.
//! - **Cross-entity rules** that the lifecycle operations run against the
//!   records they fetched from the store before the one terminal insert.
//!   They return a classified [`AppError`] directly.

use crate::domain::{Customer, CustomerId, Payment, PaymentMethod, PaymentMethodType};
use crate::error::{AppError, DomainError, RepoError};

/// Earliest accepted card expiration year.
pub const MIN_EXP_YEAR: i32 = 2023;

/// Page size used when a list request does not name one.
pub const DEFAULT_LIST_LIMIT: u32 = 10;

const CARD_NUMBER_LEN: usize = 16;
const MIN_BANK_ACCOUNT_LEN: usize = 4;

// ─────────────────────────────────────────────────────────────────────────────
// Input rules
// ─────────────────────────────────────────────────────────────────────────────

/// Checks that an email address is plausibly deliverable.
///
/// One `@`, a non-empty local part, and a dotted domain with no empty labels.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let email = email.trim();
    let invalid = || DomainError::InvalidEmail(email.to_string());

    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }

    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::EmptyName);
    }
    Ok(())
}

pub fn validate_positive_amount(amount: i64) -> Result<(), DomainError> {
    if amount <= 0 {
        return Err(DomainError::NonPositiveAmount(amount));
    }
    Ok(())
}

/// Checks the account number and expiry supplied for a new payment method.
pub fn validate_account_details(
    method_type: PaymentMethodType,
    number: &str,
    exp_month: Option<u32>,
    exp_year: Option<i32>,
) -> Result<(), DomainError> {
    let number = number.trim();
    let invalid = |reason: String| DomainError::InvalidAccountNumber {
        kind: match method_type {
            PaymentMethodType::Card => "card",
            PaymentMethodType::BankAccount => "bank account",
        },
        reason,
    };

    if !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("must contain only digits".into()));
    }

    match method_type {
        PaymentMethodType::Card if number.len() != CARD_NUMBER_LEN => {
            return Err(invalid(format!(
                "expected {} digits, got {}",
                CARD_NUMBER_LEN,
                number.len()
            )));
        }
        PaymentMethodType::BankAccount if number.len() < MIN_BANK_ACCOUNT_LEN => {
            return Err(invalid(format!(
                "expected at least {} digits, got {}",
                MIN_BANK_ACCOUNT_LEN,
                number.len()
            )));
        }
        _ => {}
    }

    if let Some(month) = exp_month.filter(|m| !(1..=12).contains(m)) {
        return Err(DomainError::InvalidExpMonth(month));
    }

    if let Some(year) = exp_year.filter(|y| *y < MIN_EXP_YEAR) {
        return Err(DomainError::InvalidExpYear(year));
    }

    Ok(())
}

/// The security code is only shape-checked; it is never stored.
pub fn validate_cvc(cvc: &str) -> Result<(), DomainError> {
    if cvc.len() != 3 || !cvc.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::InvalidCvc);
    }
    Ok(())
}

/// Resolves the requested page size, defaulting when absent.
///
/// Any positive size is passed to the store unchanged.
pub fn resolve_limit(limit: Option<u32>) -> Result<u32, DomainError> {
    match limit {
        None => Ok(DEFAULT_LIST_LIMIT),
        Some(0) => Err(DomainError::InvalidLimit(0)),
        Some(n) => Ok(n),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cross-entity rules
// ─────────────────────────────────────────────────────────────────────────────

/// Turns the outcome of a store lookup into the entity or a classified error.
///
/// A miss is `NotFound`; any store failure is `Unavailable` wrapping it.
pub fn require_found<T>(
    fetched: Result<Option<T>, RepoError>,
    what: &str,
    id: &str,
) -> Result<T, AppError> {
    match fetched {
        Ok(Some(entity)) => Ok(entity),
        Ok(None) => Err(AppError::NotFound(format!("{} {} not found", what, id))),
        Err(e) => Err(AppError::unavailable(
            format!("Failed to look up {} {}", what, id),
            e,
        )),
    }
}

/// Validates the lookup of a referenced customer.
pub fn validate_customer_exists(
    fetched: Result<Option<Customer>, RepoError>,
    id: &CustomerId,
) -> Result<Customer, AppError> {
    require_found(fetched, "Customer", id.as_str())
}

/// A payment may only use a payment method owned by the paying customer.
pub fn validate_payment_method_ownership(
    method: &PaymentMethod,
    expected_customer_id: &CustomerId,
) -> Result<(), AppError> {
    if &method.customer_id != expected_customer_id {
        return Err(AppError::InvalidReference(format!(
            "Payment method {} does not belong to customer {}",
            method.id, expected_customer_id
        )));
    }
    Ok(())
}

/// Only succeeded payments can be refunded.
pub fn validate_payment_refundable(payment: &Payment) -> Result<(), AppError> {
    if !payment.is_refundable() {
        return Err(AppError::InvalidState(format!(
            "Payment {} cannot be refunded: status is {}",
            payment.id, payment.status
        )));
    }
    Ok(())
}

/// A refund must be positive and no larger than the payment it targets.
///
/// Earlier refunds against the same payment are not taken into account.
pub fn validate_refund_amount(refund_amount: i64, payment_amount: i64) -> Result<(), AppError> {
    if refund_amount <= 0 {
        return Err(AppError::InvalidArgument(format!(
            "Refund amount must be positive, got {}",
            refund_amount
        )));
    }
    if refund_amount > payment_amount {
        return Err(AppError::InvalidArgument(format!(
            "Refund amount {} exceeds payment amount {}",
            refund_amount, payment_amount
        )));
    }
    Ok(())
}
