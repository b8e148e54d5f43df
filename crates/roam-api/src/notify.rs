//! # Notification Dispatcher
//!
//! Fire-and-forget email tasks for booking creation and payment
//! confirmation. Tasks are spawned detached from the request; failures
//! are logged and never surfaced to the HTTP caller.

use roam_core::{BoxedMailer, BoxedStore, EmailMessage};
use tracing::{debug, warn};
use uuid::Uuid;

/// Dispatches templated notification emails out-of-band
#[derive(Clone)]
pub struct Notifier {
    store: BoxedStore,
    mailer: BoxedMailer,
}

impl Notifier {
    pub fn new(store: BoxedStore, mailer: BoxedMailer) -> Self {
        Self { store, mailer }
    }

    /// Enqueue a booking-confirmation email. Returns immediately.
    pub fn spawn_booking_confirmation(&self, booking_id: Uuid) {
        let notifier = self.clone();
        tokio::spawn(async move {
            match notifier.send_booking_confirmation(booking_id).await {
                Ok(outcome) => debug!("{}", outcome),
                Err(reason) => warn!("booking confirmation email skipped: {}", reason),
            }
        });
    }

    /// Enqueue a payment-confirmation email. Returns immediately.
    pub fn spawn_payment_confirmation(&self, payment_id: Uuid) {
        let notifier = self.clone();
        tokio::spawn(async move {
            match notifier.send_payment_confirmation(payment_id).await {
                Ok(outcome) => debug!("{}", outcome),
                Err(reason) => warn!("payment confirmation email skipped: {}", reason),
            }
        });
    }

    /// Compose and send the booking-confirmation email.
    ///
    /// Runs detached, so a missing entity degrades to an error string
    /// rather than a typed error.
    pub async fn send_booking_confirmation(&self, booking_id: Uuid) -> Result<String, String> {
        let booking = self
            .store
            .booking(booking_id)
            .await
            .map_err(|_| format!("Booking with ID {} does not exist", booking_id))?;
        let guest = self
            .store
            .user(booking.guest_id)
            .await
            .map_err(|_| format!("User with ID {} does not exist", booking.guest_id))?;

        let body = format!(
            "Hello {},\n\n\
             Your booking with ID {} has been created successfully.\n\
             We'll notify you once it's confirmed.\n\n\
             Thank you for booking with us!",
            guest.full_name(),
            booking.id
        );

        self.mailer
            .send(EmailMessage::new(&guest.email, "Booking Confirmation", body))
            .await
            .map_err(|e| format!("Mail transport failed: {}", e))?;

        Ok(format!(
            "Email sent to {} for booking {}",
            guest.email, booking.id
        ))
    }

    /// Compose and send the payment-confirmation email.
    pub async fn send_payment_confirmation(&self, payment_id: Uuid) -> Result<String, String> {
        let payment = self
            .store
            .payment(payment_id)
            .await
            .map_err(|_| format!("Payment with ID {} was not found", payment_id))?;
        let booking = self
            .store
            .booking(payment.booking_id)
            .await
            .map_err(|_| format!("Booking with ID {} does not exist", payment.booking_id))?;
        let guest = self
            .store
            .user(booking.guest_id)
            .await
            .map_err(|_| format!("User with ID {} does not exist", booking.guest_id))?;

        let body = format!(
            "Hello {},\n\n\
             Your payment of {} for booking {} has been confirmed successfully.\n\n\
             Thank you for using our service!",
            guest.full_name(),
            payment.amount.display(),
            booking.id
        );

        self.mailer
            .send(EmailMessage::new(&guest.email, "Payment Confirmation", body))
            .await
            .map_err(|e| format!("Mail transport failed: {}", e))?;

        Ok(format!(
            "Email sent to {} for payment {}",
            guest.email, payment.id
        ))
    }
}
