//! Payment Application Service
//!
//! Orchestrates domain operations through the store port.
//! Contains NO infrastructure logic - pure business orchestration.

use std::sync::Arc;

use chrono::Utc;
use payments_types::validation::{
    require_found, resolve_limit, validate_account_details, validate_customer_exists, validate_cvc,
    validate_payment_method_ownership, validate_payment_refundable, validate_positive_amount,
    validate_refund_amount,
};
use payments_types::{
    AlwaysSucceeds, AppError, CreateCustomerRequest, CreatePaymentMethodRequest,
    CreatePaymentRequest, CreateRefundRequest, Customer, CustomerId, EntityStore, IdGenerator,
    ListCustomersParams, ListPaymentMethodsParams, ListPaymentsParams, ListRefundsParams,
    OutcomeResolver, Payment, PaymentId, PaymentMethod, PaymentMethodId, Refund, RefundId,
    RepoError, TimeOrderedIds,
};

/// Application service for payment records.
///
/// Generic over `S: EntityStore` - the adapter is injected at compile time.
/// Identifier generation and creation-time outcomes are pluggable at runtime.
pub struct PaymentService<S: EntityStore> {
    store: S,
    ids: Arc<dyn IdGenerator>,
    outcomes: Arc<dyn OutcomeResolver>,
}

impl<S: EntityStore> PaymentService<S> {
    /// Creates a service with time-ordered ids and an always-succeeding resolver.
    pub fn new(store: S) -> Self {
        Self {
            store,
            ids: Arc::new(TimeOrderedIds),
            outcomes: Arc::new(AlwaysSucceeds),
        }
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    pub fn with_outcome_resolver(mut self, outcomes: impl OutcomeResolver) -> Self {
        self.outcomes = Arc::new(outcomes);
        self
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist_failed(what: &str, id: &str, err: RepoError) -> AppError {
        tracing::error!(error = %err, %id, "Failed to persist {}", what);
        AppError::unavailable(format!("Failed to create {} {}", what, id), err)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Customer Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Creates a new customer.
    #[tracing::instrument(skip_all)]
    pub async fn create_customer(&self, req: CreateCustomerRequest) -> Result<Customer, AppError> {
        let id = CustomerId::new(self.ids.next_id(CustomerId::KIND));
        let customer = Customer::new(id, req.email, req.name, Utc::now())?;

        self.store
            .insert_customer(&customer)
            .await
            .map_err(|e| Self::persist_failed("customer", customer.id.as_str(), e))?;

        tracing::info!(customer_id = %customer.id, "Customer created");
        Ok(customer)
    }

    /// Gets a customer by ID.
    pub async fn get_customer(&self, id: &CustomerId) -> Result<Customer, AppError> {
        validate_customer_exists(self.store.get_customer(id).await, id)
    }

    /// Lists customers in creation order.
    pub async fn list_customers(
        &self,
        params: ListCustomersParams,
    ) -> Result<Vec<Customer>, AppError> {
        let limit = resolve_limit(params.limit)?;
        self.store
            .list_customers(limit)
            .await
            .map_err(|e| AppError::unavailable("Failed to list customers", e))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Payment Method Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Attaches a payment method to an existing customer.
    ///
    /// Only the last four digits of the number are kept.
    #[tracing::instrument(skip_all, fields(customer_id = %req.customer_id, method_type = %req.method_type))]
    pub async fn create_payment_method(
        &self,
        req: CreatePaymentMethodRequest,
    ) -> Result<PaymentMethod, AppError> {
        validate_account_details(req.method_type, &req.card_number, req.exp_month, req.exp_year)?;
        if let Some(cvc) = req.cvc.as_deref() {
            validate_cvc(cvc)?;
        }

        let customer = validate_customer_exists(
            self.store.get_customer(&req.customer_id).await,
            &req.customer_id,
        )
        .map_err(AppError::into_reference_error)?;

        let id = PaymentMethodId::new(self.ids.next_id(PaymentMethodId::KIND));
        let method = PaymentMethod::new(
            id,
            customer.id,
            req.method_type,
            &req.card_number,
            req.exp_month,
            req.exp_year,
            Utc::now(),
        )?;

        self.store
            .insert_payment_method(&method)
            .await
            .map_err(|e| Self::persist_failed("payment method", method.id.as_str(), e))?;

        tracing::info!(payment_method_id = %method.id, "Payment method created");
        Ok(method)
    }

    /// Gets a payment method by ID.
    pub async fn get_payment_method(&self, id: &PaymentMethodId) -> Result<PaymentMethod, AppError> {
        require_found(
            self.store.get_payment_method(id).await,
            "Payment method",
            id.as_str(),
        )
    }

    /// Lists payment methods, optionally only those of one customer.
    pub async fn list_payment_methods(
        &self,
        params: ListPaymentMethodsParams,
    ) -> Result<Vec<PaymentMethod>, AppError> {
        let limit = resolve_limit(params.limit)?;
        self.store
            .list_payment_methods(params.customer_id.as_ref(), limit)
            .await
            .map_err(|e| AppError::unavailable("Failed to list payment methods", e))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Payment Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Records a payment by a customer with one of their payment methods.
    #[tracing::instrument(
        skip_all,
        fields(customer_id = %req.customer_id, payment_method_id = %req.payment_method_id, amount = req.amount)
    )]
    pub async fn create_payment(&self, req: CreatePaymentRequest) -> Result<Payment, AppError> {
        validate_positive_amount(req.amount)?;

        let customer = validate_customer_exists(
            self.store.get_customer(&req.customer_id).await,
            &req.customer_id,
        )
        .map_err(AppError::into_reference_error)?;

        let method = require_found(
            self.store.get_payment_method(&req.payment_method_id).await,
            "Payment method",
            req.payment_method_id.as_str(),
        )
        .map_err(AppError::into_reference_error)?;

        validate_payment_method_ownership(&method, &customer.id)?;

        let id = PaymentId::new(self.ids.next_id(PaymentId::KIND));
        let mut payment = Payment::pending(
            id,
            req.amount,
            req.currency,
            customer.id,
            method.id,
            req.description,
            Utc::now(),
        )?;
        payment.status = self.outcomes.resolve_payment(&payment).await;

        self.store
            .insert_payment(&payment)
            .await
            .map_err(|e| Self::persist_failed("payment", payment.id.as_str(), e))?;

        tracing::info!(payment_id = %payment.id, status = %payment.status, "Payment recorded");
        Ok(payment)
    }

    /// Gets a payment by ID.
    pub async fn get_payment(&self, id: &PaymentId) -> Result<Payment, AppError> {
        require_found(self.store.get_payment(id).await, "Payment", id.as_str())
    }

    /// Lists payments, optionally only those made by one customer.
    pub async fn list_payments(&self, params: ListPaymentsParams) -> Result<Vec<Payment>, AppError> {
        let limit = resolve_limit(params.limit)?;
        self.store
            .list_payments(params.customer_id.as_ref(), limit)
            .await
            .map_err(|e| AppError::unavailable("Failed to list payments", e))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Refund Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Refunds (part of) a succeeded payment.
    ///
    /// Each refund is checked against the payment amount alone; earlier
    /// refunds of the same payment are not summed.
    #[tracing::instrument(skip_all, fields(payment_id = %req.payment_id, amount = req.amount))]
    pub async fn create_refund(&self, req: CreateRefundRequest) -> Result<Refund, AppError> {
        let payment = require_found(
            self.store.get_payment(&req.payment_id).await,
            "Payment",
            req.payment_id.as_str(),
        )
        .map_err(AppError::into_reference_error)?;

        validate_payment_refundable(&payment)?;
        validate_refund_amount(req.amount, payment.amount)?;

        let id = RefundId::new(self.ids.next_id(RefundId::KIND));
        let mut refund = Refund::pending(
            id,
            payment.id.clone(),
            req.amount,
            req.reason.filter(|r| !r.trim().is_empty()),
            Utc::now(),
        );
        refund.status = self.outcomes.resolve_refund(&refund, &payment).await;

        self.store
            .insert_refund(&refund)
            .await
            .map_err(|e| Self::persist_failed("refund", refund.id.as_str(), e))?;

        tracing::info!(refund_id = %refund.id, status = %refund.status, "Refund recorded");
        Ok(refund)
    }

    /// Gets a refund by ID.
    pub async fn get_refund(&self, id: &RefundId) -> Result<Refund, AppError> {
        require_found(self.store.get_refund(id).await, "Refund", id.as_str())
    }

    /// Lists refunds, optionally only those of one payment.
    pub async fn list_refunds(&self, params: ListRefundsParams) -> Result<Vec<Refund>, AppError> {
        let limit = resolve_limit(params.limit)?;
        self.store
            .list_refunds(params.payment_id.as_ref(), limit)
            .await
            .map_err(|e| AppError::unavailable("Failed to list refunds", e))
    }
}
