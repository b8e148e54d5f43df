//! Workflow controller tests: payment initiation and verification state
//! transitions, persistence rules, and email enqueues.

mod common;

use common::{harness, seed_booking, wait_for_emails, InitScript, ScriptedGateway, VerifyScript};
use roam_core::{BookingStatus, PaymentStatus, Store, TravelError};
use std::sync::atomic::Ordering;
use uuid::Uuid;

#[tokio::test]
async fn initiate_with_missing_inputs_is_rejected() {
    let h = harness(ScriptedGateway::accepting());
    let (_, _, booking) = seed_booking(&h.store).await;

    let err = h.state.workflow.initiate(None, Some(850.0)).await.unwrap_err();
    assert!(matches!(err, TravelError::Validation(_)));

    let err = h.state.workflow.initiate(Some(booking.id), None).await.unwrap_err();
    assert!(matches!(err, TravelError::Validation(_)));

    let err = h
        .state
        .workflow
        .initiate(Some(booking.id), Some(0.0))
        .await
        .unwrap_err();
    assert!(matches!(err, TravelError::Validation(_)));

    // No payment row was created, and the gateway was never called.
    assert!(h.store.payments().await.unwrap().is_empty());
    assert_eq!(h.gateway.init_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn initiate_for_unknown_booking_is_not_found() {
    let h = harness(ScriptedGateway::accepting());

    let err = h
        .state
        .workflow
        .initiate(Some(Uuid::new_v4()), Some(850.0))
        .await
        .unwrap_err();

    assert!(matches!(err, TravelError::NotFound { entity: "Booking", .. }));
    assert!(h.store.payments().await.unwrap().is_empty());
}

#[tokio::test]
async fn initiate_gateway_http_failure_persists_nothing() {
    let h = harness(ScriptedGateway::new(
        InitScript::HttpFailure,
        VerifyScript::Success,
    ));
    let (_, _, booking) = seed_booking(&h.store).await;

    let err = h
        .state
        .workflow
        .initiate(Some(booking.id), Some(850.0))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 502);
    assert!(h.store.payments().await.unwrap().is_empty());
}

#[tokio::test]
async fn initiate_gateway_decline_persists_nothing() {
    let h = harness(ScriptedGateway::new(
        InitScript::Decline,
        VerifyScript::Success,
    ));
    let (_, _, booking) = seed_booking(&h.store).await;

    let err = h
        .state
        .workflow
        .initiate(Some(booking.id), Some(850.0))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 400);
    assert!(h.store.payments().await.unwrap().is_empty());
}

#[tokio::test]
async fn initiate_success_creates_one_pending_payment() {
    let h = harness(ScriptedGateway::accepting());
    let (guest, _, booking) = seed_booking(&h.store).await;

    let initiated = h
        .state
        .workflow
        .initiate(Some(booking.id), Some(850.0))
        .await
        .unwrap();

    assert_eq!(initiated.status, PaymentStatus::Pending);
    assert_eq!(initiated.tx_ref, format!("{}-{}", booking.id, guest.id));
    assert!(initiated.checkout_url.contains("checkout.test"));

    let payments = h.store.payments().await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].id, initiated.payment_id);
    assert_eq!(payments[0].status, PaymentStatus::Pending);
    assert_eq!(payments[0].amount.to_wire(), "850.00");
}

#[tokio::test]
async fn initiate_over_active_payment_conflicts() {
    let h = harness(ScriptedGateway::accepting());
    let (_, _, booking) = seed_booking(&h.store).await;

    h.state
        .workflow
        .initiate(Some(booking.id), Some(850.0))
        .await
        .unwrap();

    let err = h
        .state
        .workflow
        .initiate(Some(booking.id), Some(850.0))
        .await
        .unwrap_err();

    assert!(matches!(err, TravelError::ActivePaymentExists { .. }));
    assert_eq!(err.status_code(), 409);
    assert_eq!(h.store.payments().await.unwrap().len(), 1);
    // The second attempt never reached the gateway.
    assert_eq!(h.gateway.init_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn initiate_after_failed_payment_is_allowed() {
    let h = harness(ScriptedGateway::new(
        InitScript::Accept,
        VerifyScript::Failed,
    ));
    let (_, _, booking) = seed_booking(&h.store).await;

    let first = h
        .state
        .workflow
        .initiate(Some(booking.id), Some(850.0))
        .await
        .unwrap();
    h.state.workflow.verify(first.payment_id).await.unwrap();

    // The failed payment no longer blocks a retry.
    let second = h
        .state
        .workflow
        .initiate(Some(booking.id), Some(850.0))
        .await
        .unwrap();
    assert_ne!(first.payment_id, second.payment_id);
    assert_eq!(h.store.payments().await.unwrap().len(), 2);
}

#[tokio::test]
async fn verify_success_completes_payment_and_confirms_booking() {
    let h = harness(ScriptedGateway::accepting());
    let (_, _, booking) = seed_booking(&h.store).await;

    let initiated = h
        .state
        .workflow
        .initiate(Some(booking.id), Some(850.0))
        .await
        .unwrap();

    let verified = h.state.workflow.verify(initiated.payment_id).await.unwrap();
    assert!(verified.is_completed());

    // Completed status is persisted.
    let payment = h.store.payment(initiated.payment_id).await.unwrap();
    assert_eq!(payment.status, PaymentStatus::Completed);

    // Payment completion confirms the booking.
    let booking = h.store.booking(booking.id).await.unwrap();
    assert_eq!(booking.status, BookingStatus::Confirmed);

    // Exactly one payment-confirmation email.
    wait_for_emails(&h.mailer, 1).await;
    let sent = h.mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Payment Confirmation");
    assert_eq!(sent[0].to, "abel@example.com");
}

#[tokio::test]
async fn verify_failure_fails_payment_without_email() {
    let h = harness(ScriptedGateway::new(
        InitScript::Accept,
        VerifyScript::Failed,
    ));
    let (_, _, booking) = seed_booking(&h.store).await;

    let initiated = h
        .state
        .workflow
        .initiate(Some(booking.id), Some(850.0))
        .await
        .unwrap();

    let verified = h.state.workflow.verify(initiated.payment_id).await.unwrap();
    assert!(!verified.is_completed());
    assert_eq!(verified.status, PaymentStatus::Failed);

    let payment = h.store.payment(initiated.payment_id).await.unwrap();
    assert_eq!(payment.status, PaymentStatus::Failed);

    // Booking stays pending and no email goes out.
    let booking = h.store.booking(booking.id).await.unwrap();
    assert_eq!(booking.status, BookingStatus::Pending);

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(h.mailer.count(), 0);
}

#[tokio::test]
async fn verify_gateway_http_failure_leaves_status_untouched() {
    let h = harness(ScriptedGateway::new(
        InitScript::Accept,
        VerifyScript::HttpFailure,
    ));
    let (_, _, booking) = seed_booking(&h.store).await;

    let initiated = h
        .state
        .workflow
        .initiate(Some(booking.id), Some(850.0))
        .await
        .unwrap();

    let err = h.state.workflow.verify(initiated.payment_id).await.unwrap_err();
    assert_eq!(err.status_code(), 502);

    // No status change was persisted.
    let payment = h.store.payment(initiated.payment_id).await.unwrap();
    assert_eq!(payment.status, PaymentStatus::Pending);
    assert_eq!(h.mailer.count(), 0);
}

#[tokio::test]
async fn verify_after_completion_is_idempotent() {
    let h = harness(ScriptedGateway::accepting());
    let (_, _, booking) = seed_booking(&h.store).await;

    let initiated = h
        .state
        .workflow
        .initiate(Some(booking.id), Some(850.0))
        .await
        .unwrap();

    h.state.workflow.verify(initiated.payment_id).await.unwrap();
    wait_for_emails(&h.mailer, 1).await;

    // A second verify reports completed without touching the gateway
    // or enqueueing another email.
    let verified = h.state.workflow.verify(initiated.payment_id).await.unwrap();
    assert!(verified.is_completed());
    assert_eq!(h.gateway.verify_calls.load(Ordering::SeqCst), 1);

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(h.mailer.count(), 1);
}

#[tokio::test]
async fn verify_cannot_resurrect_failed_payment() {
    // The gateway would answer success, but a failed payment is terminal.
    let h = harness(ScriptedGateway::accepting());
    let (_, _, booking) = seed_booking(&h.store).await;

    let first = h
        .state
        .workflow
        .initiate(Some(booking.id), Some(850.0))
        .await
        .unwrap();

    let mut payment = h.store.payment(first.payment_id).await.unwrap();
    payment.status = PaymentStatus::Failed;
    h.store.update_payment(payment).await.unwrap();

    // A retry payment is now active for the booking.
    let second = h
        .state
        .workflow
        .initiate(Some(booking.id), Some(850.0))
        .await
        .unwrap();

    let verified = h.state.workflow.verify(first.payment_id).await.unwrap();
    assert_eq!(verified.status, PaymentStatus::Failed);
    assert_eq!(h.gateway.verify_calls.load(Ordering::SeqCst), 0);

    // Only the retry counts as active, so the one-per-booking rule holds.
    let payments = h.store.payments_for_booking(booking.id).await.unwrap();
    let active: Vec<_> = payments.iter().filter(|p| p.is_active()).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, second.payment_id);

    // Booking was never confirmed and no email went out.
    let booking = h.store.booking(booking.id).await.unwrap();
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(h.mailer.count(), 0);
}

#[tokio::test]
async fn verify_unknown_payment_is_not_found() {
    let h = harness(ScriptedGateway::accepting());

    let err = h.state.workflow.verify(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, TravelError::NotFound { entity: "Payment", .. }));
    assert_eq!(h.gateway.verify_calls.load(Ordering::SeqCst), 0);
}
