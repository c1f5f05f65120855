//! Form, list and delete flows over the in-memory repository

use nile_admin::form::SubmitOutcome;
use nile_admin::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

fn payment_form_with(
    amount: &str,
    method: &str,
    transaction_id: &str,
) -> FormController<Payment> {
    let mut form = FormController::<Payment>::for_create();
    form.set_field("amount", amount);
    form.set_field("payment_method", method);
    form.set_field("transaction_id", transaction_id);
    form.set_field("customer_id", "1");
    form
}

#[tokio::test]
async fn test_payment_form_validates_then_saves() {
    let repo = InMemoryRepository::<Payment>::new();
    let mut form = FormController::<Payment>::for_create();
    assert_eq!(form.draft().get("payment_status"), "PENDING");
    assert!(!form.draft().get("payment_date").is_empty());

    let SubmitOutcome::Invalid(errors) = form.submit(&repo).await else {
        panic!("empty payment form must not submit");
    };
    assert_eq!(errors.get("amount"), Some("Valid amount is required"));
    assert_eq!(errors.get("payment_method"), Some("Payment method is required"));
    assert_eq!(errors.get("customer_id"), Some("Valid customer is required"));
    assert_eq!(
        errors.get("transaction_id"),
        Some("Transaction ID is required and must be at least 3 characters long")
    );
    assert_eq!(repo.calls(), 0);

    form.set_field("amount", "49.90");
    assert!(form.field_error("amount").is_none());
    assert!(form.field_error("transaction_id").is_some());

    form.set_field("payment_method", "PAYPAL");
    form.set_field("transaction_id", "TX-1001");
    form.set_field("customer_id", "1");

    let SubmitOutcome::Saved(payment) = form.submit(&repo).await else {
        panic!("valid payment form must save");
    };
    assert_eq!(payment.amount, Decimal::from_str("49.90").unwrap());
    assert_eq!(payment.payment_method, PaymentMethod::Paypal);
    assert_eq!(payment.payment_status, PaymentStatus::Pending);
    assert_eq!(form.state(), FormState::Success);
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_edit_form_round_trip() {
    let repo = InMemoryRepository::<Category>::new();
    let created = repo
        .create(&Draft::new(Resource::Category, DraftMode::Create).with("name", "Tools"))
        .await
        .unwrap();

    let mut form = FormController::<Category>::for_edit(created.id);
    assert!(!form.set_field("name", "too early"));
    assert!(form.load(&repo).await);
    assert_eq!(form.draft().get("name"), "Tools");

    form.set_field("name", "Hand tools");
    let SubmitOutcome::Saved(updated) = form.submit(&repo).await else {
        panic!("edit must save");
    };
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Hand tools");
    assert_eq!(repo.get_by_id(created.id).await.unwrap().name, "Hand tools");
}

#[tokio::test]
async fn test_transport_failure_keeps_draft_for_retry() {
    let repo = InMemoryRepository::<Payment>::new();
    let mut form = payment_form_with("10", "CREDIT_CARD", "TX-2");

    repo.fail_next(ClientError::transport("connection refused"));
    let SubmitOutcome::Failed(error) = form.submit(&repo).await else {
        panic!("first submit must fail");
    };
    assert!(error.message.contains("Please try again"));
    assert_eq!(form.draft().get("transaction_id"), "TX-2");
    assert!(form.can_submit());

    assert!(matches!(form.submit(&repo).await, SubmitOutcome::Saved(_)));
    assert!(form.form_error().is_none());
}

#[tokio::test]
async fn test_list_view_over_saved_payments() {
    let repo = InMemoryRepository::<Payment>::new();
    for (amount, method, tx) in [
        ("30", "PAYPAL", "TX-A"),
        ("5.50", "CREDIT_CARD", "TX-B"),
        ("120", "PAYPAL", "TX-C"),
    ] {
        let mut form = payment_form_with(amount, method, tx);
        assert!(matches!(form.submit(&repo).await, SubmitOutcome::Saved(_)));
    }

    let mut list = Collection::new(repo.list_all().await.unwrap());
    list.update_state(|s| {
        s.with_filter("method", "PAYPAL")
            .with_sort(SortKey::desc("amount"))
    });
    let amounts: Vec<String> = list.view().iter().map(|p| p.amount.to_string()).collect();
    assert_eq!(amounts, vec!["120", "30"]);

    list.update_state(|s| s.without_filter("method").with_search("tx-b"));
    assert_eq!(list.view().len(), 1);

    list.update_state(|s| s.with_filter("unknown", "x"));
    assert!(list.view().is_empty());
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let repo = InMemoryRepository::<Payment>::new();
    let mut form = payment_form_with("10", "CREDIT_CARD", "TX-9");
    let SubmitOutcome::Saved(payment) = form.submit(&repo).await else {
        panic!("payment must save");
    };

    let mut list = Collection::new(repo.list_all().await.unwrap());
    let mut delete = DeleteController::new(Resource::Payment);

    delete.confirm_and_delete(&repo, &mut list).await;
    assert_eq!(repo.len(), 1);

    delete.request(payment.id);
    assert!(delete.prompt().unwrap().contains("payment record"));
    let state = delete.confirm_and_delete(&repo, &mut list).await;
    assert_eq!(state, &DeleteState::Deleted { id: payment.id });
    assert!(list.is_empty());
    assert!(repo.is_empty());
}
