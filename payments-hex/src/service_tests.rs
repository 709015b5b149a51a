//! PaymentService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use payments_types::{
        AppError, CreateCustomerRequest, CreatePaymentMethodRequest, CreatePaymentRequest,
        CreateRefundRequest, CurrencyCode, Customer, CustomerId, EntityStore, ErrorKind,
        ListCustomersParams, ListPaymentMethodsParams, ListPaymentsParams, ListRefundsParams,
        OutcomeResolver, Payment, PaymentId, PaymentMethod, PaymentMethodId, PaymentMethodType,
        PaymentStatus, Refund, RefundId, RefundStatus, RepoError, SequentialIds,
    };

    use crate::PaymentService;

    /// Simple in-memory store for testing the service layer.
    ///
    /// `fail` makes every call return a database error.
    #[derive(Default)]
    pub struct MockStore {
        customers: Mutex<Vec<Customer>>,
        payment_methods: Mutex<Vec<PaymentMethod>>,
        payments: Mutex<Vec<Payment>>,
        refunds: Mutex<Vec<Refund>>,
        fail: AtomicBool,
    }

    impl MockStore {
        pub fn new() -> Self {
            Self::default()
        }

        fn check(&self) -> Result<(), RepoError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(RepoError::Database("connection refused".into()));
            }
            Ok(())
        }

        fn writes(&self) -> usize {
            self.customers.lock().unwrap().len()
                + self.payment_methods.lock().unwrap().len()
                + self.payments.lock().unwrap().len()
                + self.refunds.lock().unwrap().len()
        }
    }

    fn page<T: Clone>(rows: &[T], keep: impl Fn(&T) -> bool, limit: u32) -> Vec<T> {
        rows.iter()
            .filter(|r| keep(r))
            .take(limit as usize)
            .cloned()
            .collect()
    }

    #[async_trait]
    impl EntityStore for MockStore {
        async fn insert_customer(&self, customer: &Customer) -> Result<(), RepoError> {
            self.check()?;
            self.customers.lock().unwrap().push(customer.clone());
            Ok(())
        }

        async fn get_customer(&self, id: &CustomerId) -> Result<Option<Customer>, RepoError> {
            self.check()?;
            let rows = self.customers.lock().unwrap();
            Ok(rows.iter().find(|c| &c.id == id).cloned())
        }

        async fn list_customers(&self, limit: u32) -> Result<Vec<Customer>, RepoError> {
            self.check()?;
            Ok(page(&self.customers.lock().unwrap(), |_| true, limit))
        }

        async fn insert_payment_method(&self, method: &PaymentMethod) -> Result<(), RepoError> {
            self.check()?;
            self.payment_methods.lock().unwrap().push(method.clone());
            Ok(())
        }

        async fn get_payment_method(
            &self,
            id: &PaymentMethodId,
        ) -> Result<Option<PaymentMethod>, RepoError> {
            self.check()?;
            let rows = self.payment_methods.lock().unwrap();
            Ok(rows.iter().find(|m| &m.id == id).cloned())
        }

        async fn list_payment_methods(
            &self,
            customer_id: Option<&CustomerId>,
            limit: u32,
        ) -> Result<Vec<PaymentMethod>, RepoError> {
            self.check()?;
            let rows = self.payment_methods.lock().unwrap();
            Ok(page(
                &rows,
                |m| customer_id.is_none_or(|c| &m.customer_id == c),
                limit,
            ))
        }

        async fn insert_payment(&self, payment: &Payment) -> Result<(), RepoError> {
            self.check()?;
            self.payments.lock().unwrap().push(payment.clone());
            Ok(())
        }

        async fn get_payment(&self, id: &PaymentId) -> Result<Option<Payment>, RepoError> {
            self.check()?;
            let rows = self.payments.lock().unwrap();
            Ok(rows.iter().find(|p| &p.id == id).cloned())
        }

        async fn list_payments(
            &self,
            customer_id: Option<&CustomerId>,
            limit: u32,
        ) -> Result<Vec<Payment>, RepoError> {
            self.check()?;
            let rows = self.payments.lock().unwrap();
            Ok(page(
                &rows,
                |p| customer_id.is_none_or(|c| &p.customer_id == c),
                limit,
            ))
        }

        async fn insert_refund(&self, refund: &Refund) -> Result<(), RepoError> {
            self.check()?;
            self.refunds.lock().unwrap().push(refund.clone());
            Ok(())
        }

        async fn get_refund(&self, id: &RefundId) -> Result<Option<Refund>, RepoError> {
            self.check()?;
            let rows = self.refunds.lock().unwrap();
            Ok(rows.iter().find(|r| &r.id == id).cloned())
        }

        async fn list_refunds(
            &self,
            payment_id: Option<&PaymentId>,
            limit: u32,
        ) -> Result<Vec<Refund>, RepoError> {
            self.check()?;
            let rows = self.refunds.lock().unwrap();
            Ok(page(
                &rows,
                |r| payment_id.is_none_or(|p| &r.payment_id == p),
                limit,
            ))
        }
    }

    /// Records every payment as failed.
    struct DeclinesPayments;

    #[async_trait]
    impl OutcomeResolver for DeclinesPayments {
        async fn resolve_payment(&self, _payment: &Payment) -> PaymentStatus {
            PaymentStatus::Failed
        }

        async fn resolve_refund(&self, _refund: &Refund, _payment: &Payment) -> RefundStatus {
            RefundStatus::Succeeded
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn service() -> PaymentService<MockStore> {
        PaymentService::new(MockStore::new()).with_id_generator(SequentialIds::new())
    }

    fn customer_req(email: &str) -> CreateCustomerRequest {
        CreateCustomerRequest {
            email: email.to_string(),
            name: "John Doe".to_string(),
        }
    }

    fn card_req(customer_id: &CustomerId) -> CreatePaymentMethodRequest {
        CreatePaymentMethodRequest {
            customer_id: customer_id.clone(),
            method_type: PaymentMethodType::Card,
            card_number: "4242424242424242".to_string(),
            exp_month: Some(12),
            exp_year: Some(2030),
            cvc: Some("123".to_string()),
        }
    }

    fn payment_req(
        customer_id: &CustomerId,
        payment_method_id: &PaymentMethodId,
        amount: i64,
    ) -> CreatePaymentRequest {
        CreatePaymentRequest {
            amount,
            currency: CurrencyCode::parse("usd").unwrap(),
            customer_id: customer_id.clone(),
            payment_method_id: payment_method_id.clone(),
            description: Some("Payment for order #1234".to_string()),
        }
    }

    fn refund_req(payment_id: &PaymentId, amount: i64) -> CreateRefundRequest {
        CreateRefundRequest {
            payment_id: payment_id.clone(),
            amount,
            reason: Some("requested_by_customer".to_string()),
        }
    }

    async fn customer_with_card<S: EntityStore>(
        service: &PaymentService<S>,
        email: &str,
    ) -> (Customer, PaymentMethod) {
        let customer = service.create_customer(customer_req(email)).await.unwrap();
        let method = service
            .create_payment_method(card_req(&customer.id))
            .await
            .unwrap();
        (customer, method)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Customers
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_create_customer_success() {
        let service = PaymentService::new(MockStore::new());

        let customer = service
            .create_customer(customer_req("user@example.com"))
            .await
            .unwrap();

        assert!(customer.id.as_str().starts_with("cus_"));
        assert_eq!(customer.created_at, customer.updated_at);
        assert_eq!(customer.email, "user@example.com");
    }

    #[tokio::test]
    async fn test_create_customer_invalid_email_fails() {
        let service = service();

        let result = service.create_customer(customer_req("not-an-email")).await;

        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
        assert_eq!(service.store().writes(), 0);
    }

    #[tokio::test]
    async fn test_create_customer_blank_name_fails() {
        let service = service();

        let result = service
            .create_customer(CreateCustomerRequest {
                email: "user@example.com".to_string(),
                name: "   ".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
        assert_eq!(service.store().writes(), 0);
    }

    #[tokio::test]
    async fn test_create_customer_store_failure_is_unavailable() {
        let service = service();
        service.store().fail.store(true, Ordering::SeqCst);

        let err = service
            .create_customer(customer_req("user@example.com"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[tokio::test]
    async fn test_get_customer_round_trip_and_not_found() {
        let service = service();
        let created = service
            .create_customer(customer_req("user@example.com"))
            .await
            .unwrap();

        let fetched = service.get_customer(&created.id).await.unwrap();
        assert_eq!(fetched, created);

        let missing = service.get_customer(&CustomerId::new("cus_404")).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Payment methods
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_create_payment_method_keeps_last4_only() {
        let service = service();
        let (customer, method) = customer_with_card(&service, "user@example.com").await;

        assert_eq!(method.customer_id, customer.id);
        assert_eq!(method.last4, "4242");
        assert_eq!(method.brand, "visa");
        assert_eq!(method.exp_month, Some(12));
    }

    #[tokio::test]
    async fn test_create_payment_method_unknown_customer_writes_nothing() {
        let service = service();

        let result = service
            .create_payment_method(card_req(&CustomerId::new("cus_404")))
            .await;

        assert!(matches!(result, Err(AppError::InvalidReference(_))));
        assert_eq!(service.store().writes(), 0);
    }

    #[tokio::test]
    async fn test_create_payment_method_rejects_bad_card_details() {
        let service = service();
        let customer = service
            .create_customer(customer_req("user@example.com"))
            .await
            .unwrap();

        let mut short = card_req(&customer.id);
        short.card_number = "4242".to_string();
        let mut bad_month = card_req(&customer.id);
        bad_month.exp_month = Some(13);
        let mut bad_cvc = card_req(&customer.id);
        bad_cvc.cvc = Some("12".to_string());

        for req in [short, bad_month, bad_cvc] {
            let result = service.create_payment_method(req).await;
            assert!(matches!(result, Err(AppError::InvalidArgument(_))));
        }
    }

    #[tokio::test]
    async fn test_create_payment_method_store_failure_on_lookup() {
        let service = service();
        service.store().fail.store(true, Ordering::SeqCst);

        let err = service
            .create_payment_method(card_req(&CustomerId::new("cus_1")))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Payments
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_create_payment_success() {
        let service = service();
        let (customer, method) = customer_with_card(&service, "user@example.com").await;

        let payment = service
            .create_payment(payment_req(&customer.id, &method.id, 2000))
            .await
            .unwrap();

        assert_eq!(payment.status, PaymentStatus::Succeeded);
        assert_eq!(payment.currency.as_str(), "usd");
        assert_eq!(service.get_payment(&payment.id).await.unwrap(), payment);
    }

    #[tokio::test]
    async fn test_create_payment_with_other_customers_method_fails() {
        let service = service();
        let (alice, _) = customer_with_card(&service, "alice@example.com").await;
        let (_, bobs_card) = customer_with_card(&service, "bob@example.com").await;
        let before = service.store().writes();

        let result = service
            .create_payment(payment_req(&alice.id, &bobs_card.id, 2000))
            .await;

        assert!(matches!(result, Err(AppError::InvalidReference(_))));
        assert_eq!(service.store().writes(), before);
    }

    #[tokio::test]
    async fn test_create_payment_unknown_references_fail() {
        let service = service();
        let (customer, method) = customer_with_card(&service, "user@example.com").await;

        let unknown_customer = service
            .create_payment(payment_req(&CustomerId::new("cus_404"), &method.id, 2000))
            .await;
        assert!(matches!(unknown_customer, Err(AppError::InvalidReference(_))));

        let unknown_method = service
            .create_payment(payment_req(
                &customer.id,
                &PaymentMethodId::new("pm_404"),
                2000,
            ))
            .await;
        assert!(matches!(unknown_method, Err(AppError::InvalidReference(_))));
    }

    #[tokio::test]
    async fn test_create_payment_non_positive_amount_fails() {
        let service = service();
        let (customer, method) = customer_with_card(&service, "user@example.com").await;

        for amount in [0, -100] {
            let result = service
                .create_payment(payment_req(&customer.id, &method.id, amount))
                .await;
            assert!(matches!(result, Err(AppError::InvalidArgument(_))));
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Refunds
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_refund_over_payment_amount_fails() {
        let service = service();
        let (customer, method) = customer_with_card(&service, "user@example.com").await;
        let payment = service
            .create_payment(payment_req(&customer.id, &method.id, 2000))
            .await
            .unwrap();

        let result = service.create_refund(refund_req(&payment.id, 2001)).await;

        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_refund_of_failed_payment_is_invalid_state() {
        let service = service().with_outcome_resolver(DeclinesPayments);
        let (customer, method) = customer_with_card(&service, "user@example.com").await;
        let payment = service
            .create_payment(payment_req(&customer.id, &method.id, 2000))
            .await
            .unwrap();
        assert_eq!(payment.status, PaymentStatus::Failed);

        let result = service.create_refund(refund_req(&payment.id, 500)).await;

        assert!(matches!(result, Err(AppError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_refund_of_unknown_payment_is_invalid_reference() {
        let service = service();

        let result = service
            .create_refund(refund_req(&PaymentId::new("pay_404"), 500))
            .await;

        assert!(matches!(result, Err(AppError::InvalidReference(_))));
    }

    #[tokio::test]
    async fn test_get_refund_not_found() {
        let service = service();

        let result = service.get_refund(&RefundId::new("ref_404")).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lists
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_lists_on_empty_store_are_empty() {
        let service = service();

        assert!(
            service
                .list_customers(ListCustomersParams::default())
                .await
                .unwrap()
                .is_empty()
        );
        assert!(
            service
                .list_refunds(ListRefundsParams::default())
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_list_respects_limit_and_order() {
        let service = service();
        for i in 0..5 {
            service
                .create_customer(customer_req(&format!("user{}@example.com", i)))
                .await
                .unwrap();
        }

        let page = service
            .list_customers(ListCustomersParams { limit: Some(3) })
            .await
            .unwrap();
        let ids: Vec<&str> = page.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["cus_1", "cus_2", "cus_3"]);

        let out_of_range = service
            .list_customers(ListCustomersParams { limit: Some(0) })
            .await;
        assert!(matches!(out_of_range, Err(AppError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_list_filters_by_owner() {
        let service = service();
        let (alice, alice_card) = customer_with_card(&service, "alice@example.com").await;
        let (bob, bob_card) = customer_with_card(&service, "bob@example.com").await;
        let alice_payment = service
            .create_payment(payment_req(&alice.id, &alice_card.id, 1000))
            .await
            .unwrap();
        service
            .create_payment(payment_req(&bob.id, &bob_card.id, 3000))
            .await
            .unwrap();

        let methods = service
            .list_payment_methods(ListPaymentMethodsParams {
                customer_id: Some(bob.id.clone()),
                limit: None,
            })
            .await
            .unwrap();
        assert_eq!(methods, vec![bob_card]);

        let payments = service
            .list_payments(ListPaymentsParams {
                customer_id: Some(alice.id.clone()),
                limit: None,
            })
            .await
            .unwrap();
        assert_eq!(payments, vec![alice_payment]);
    }

    #[tokio::test]
    async fn test_list_store_failure_is_unavailable() {
        let service = service();
        service.store().fail.store(true, Ordering::SeqCst);

        let err = service
            .list_payments(ListPaymentsParams::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // End to end
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_full_lifecycle_with_repeated_full_refund() {
        let service = service();

        let customer = service
            .create_customer(customer_req("user@example.com"))
            .await
            .unwrap();
        assert_eq!(customer.id.as_str(), "cus_1");

        let method = service
            .create_payment_method(card_req(&customer.id))
            .await
            .unwrap();
        assert_eq!(method.id.as_str(), "pm_1");
        assert_eq!(method.last4, "4242");

        let payment = service
            .create_payment(payment_req(&customer.id, &method.id, 2000))
            .await
            .unwrap();
        assert_eq!(payment.id.as_str(), "pay_1");
        assert_eq!(payment.status, PaymentStatus::Succeeded);

        let refund = service
            .create_refund(refund_req(&payment.id, 2000))
            .await
            .unwrap();
        assert_eq!(refund.id.as_str(), "ref_1");
        assert_eq!(refund.status, RefundStatus::Succeeded);

        // Refunds are not summed, so a second full refund is accepted.
        let second = service
            .create_refund(refund_req(&payment.id, 2000))
            .await
            .unwrap();
        assert_eq!(second.id.as_str(), "ref_2");
        assert_eq!(second.status, RefundStatus::Succeeded);

        let refunds = service
            .list_refunds(ListRefundsParams {
                payment_id: Some(payment.id.clone()),
                limit: None,
            })
            .await
            .unwrap();
        assert_eq!(refunds, vec![refund, second]);
    }
}
