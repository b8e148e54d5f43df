//! # Booking/Payment Workflow Controller
//!
//! Orchestrates payment initiation and verification over the gateway and
//! the store. Payment status only moves `pending -> completed` or
//! `pending -> failed`; a successful verification also confirms the
//! underlying booking.

use crate::notify::Notifier;
use roam_core::{
    BookingStatus, BoxedPaymentGateway, BoxedStore, Currency, InitializeRequest, Payment,
    PaymentStatus, Price, TravelError, TravelResult, VerifyOutcome,
};
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Result of a successful payment initiation
#[derive(Debug, Clone, Serialize)]
pub struct InitiatedPayment {
    pub payment_id: Uuid,
    pub tx_ref: String,
    pub checkout_url: String,
    pub status: PaymentStatus,
}

/// Result of a payment verification round-trip
#[derive(Debug, Clone, Serialize)]
pub struct VerifiedPayment {
    pub payment_id: Uuid,
    pub booking_id: Uuid,
    pub status: PaymentStatus,
}

impl VerifiedPayment {
    pub fn is_completed(&self) -> bool {
        matches!(self.status, PaymentStatus::Completed)
    }
}

/// Payment workflow controller
#[derive(Clone)]
pub struct PaymentWorkflow {
    store: BoxedStore,
    gateway: BoxedPaymentGateway,
    notifier: Notifier,
    currency: Currency,
}

impl PaymentWorkflow {
    pub fn new(
        store: BoxedStore,
        gateway: BoxedPaymentGateway,
        notifier: Notifier,
        currency: Currency,
    ) -> Self {
        Self {
            store,
            gateway,
            notifier,
            currency,
        }
    }

    /// Initiate a payment for a booking.
    ///
    /// Both inputs arrive optional so that missing fields surface as a
    /// 400 instead of a deserialization rejection. Nothing is persisted
    /// unless the gateway accepts the transaction.
    #[instrument(skip(self))]
    pub async fn initiate(
        &self,
        booking_id: Option<Uuid>,
        amount: Option<f64>,
    ) -> TravelResult<InitiatedPayment> {
        let booking_id = booking_id.ok_or_else(|| {
            TravelError::Validation("booking_id and amount are required".to_string())
        })?;
        let amount = amount.ok_or_else(|| {
            TravelError::Validation("booking_id and amount are required".to_string())
        })?;
        if amount <= 0.0 {
            return Err(TravelError::Validation(
                "amount must be greater than zero".to_string(),
            ));
        }

        let booking = self.store.booking(booking_id).await?;
        let guest = self.store.user(booking.guest_id).await?;

        // One non-failed payment per booking.
        let existing = self.store.payments_for_booking(booking.id).await?;
        if existing.iter().any(|p| p.is_active()) {
            return Err(TravelError::ActivePaymentExists {
                booking_id: booking.id,
            });
        }

        let price = Price::new(amount, self.currency);
        let request = InitializeRequest::new(
            price,
            format!("{}-{}", booking.id, booking.guest_id),
            guest.email.clone(),
            guest.full_name(),
        )
        .with_description(format!("Payment for booking {}", booking.id));

        let tx = self.gateway.initialize(&request).await?;

        let payment = self
            .store
            .insert_payment(Payment::new(booking.id, tx.tx_ref.clone(), price))
            .await?;

        info!(
            "Payment initiated: payment_id={}, tx_ref={}, amount={}",
            payment.id,
            payment.tx_ref,
            price.display()
        );

        Ok(InitiatedPayment {
            payment_id: payment.id,
            tx_ref: payment.tx_ref,
            checkout_url: tx.checkout_url,
            status: payment.status,
        })
    }

    /// Verify a payment against the gateway and transition its status.
    ///
    /// Completed and failed are terminal: re-verifying a settled payment
    /// returns its current status without another gateway round-trip. A
    /// gateway connectivity failure propagates without persisting any
    /// status change. A reachable gateway settles a pending payment one
    /// way or the other: completed (booking confirmed, confirmation email
    /// enqueued) or failed (no email).
    #[instrument(skip(self))]
    pub async fn verify(&self, payment_id: Uuid) -> TravelResult<VerifiedPayment> {
        let mut payment = self.store.payment(payment_id).await?;

        if payment.status != PaymentStatus::Pending {
            info!(
                "Payment already settled: payment_id={}, status={}",
                payment.id,
                payment.status.as_str()
            );
            return Ok(VerifiedPayment {
                payment_id: payment.id,
                booking_id: payment.booking_id,
                status: payment.status,
            });
        }

        let outcome = self.gateway.verify(&payment.tx_ref).await?;

        match outcome {
            VerifyOutcome::Success => {
                payment.status = PaymentStatus::Completed;
                let payment = self.store.update_payment(payment).await?;

                // Payment completion confirms the booking.
                match self.store.booking(payment.booking_id).await {
                    Ok(mut booking) => {
                        if booking.status != BookingStatus::Confirmed {
                            booking.confirm();
                            self.store.update_booking(booking).await?;
                        }
                    }
                    Err(e) => {
                        warn!("payment {} verified for missing booking: {}", payment.id, e)
                    }
                }

                self.notifier.spawn_payment_confirmation(payment.id);

                info!("Payment verified: payment_id={}", payment.id);

                Ok(VerifiedPayment {
                    payment_id: payment.id,
                    booking_id: payment.booking_id,
                    status: payment.status,
                })
            }
            VerifyOutcome::Failed(gateway_status) => {
                payment.status = PaymentStatus::Failed;
                let payment = self.store.update_payment(payment).await?;

                warn!(
                    "Payment verification failed: payment_id={}, gateway_status={}",
                    payment.id, gateway_status
                );

                Ok(VerifiedPayment {
                    payment_id: payment.id,
                    booking_id: payment.booking_id,
                    status: payment.status,
                })
            }
        }
    }
}
