//! # Booking and Payment Types
//!
//! A booking is a guest's reservation against a listing. A payment is one
//! attempted monetary transaction tied to a booking; its status only moves
//! `pending -> completed` or `pending -> failed`, both terminal.

use crate::money::Price;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Awaiting payment
    Pending,
    /// Payment completed
    Confirmed,
    /// Cancelled by the guest
    Canceled,
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Pending
    }
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Canceled => "canceled",
        }
    }
}

/// A guest's reservation request against a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    /// Unique booking ID
    pub id: Uuid,

    /// Booked listing
    pub listing_id: Uuid,

    /// Booking guest
    pub guest_id: Uuid,

    /// Lifecycle status
    #[serde(default)]
    pub status: BookingStatus,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Create a new pending booking with a generated ID
    pub fn new(listing_id: Uuid, guest_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            listing_id,
            guest_id,
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Transition to confirmed
    pub fn confirm(&mut self) {
        self.status = BookingStatus::Confirmed;
    }

    /// Transition to canceled
    pub fn cancel(&mut self) {
        self.status = BookingStatus::Canceled;
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self.status, BookingStatus::Confirmed)
    }
}

/// Payment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Initiated with the gateway, awaiting verification
    Pending,
    /// Verified successfully
    Completed,
    /// Verification failed
    Failed,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
        }
    }
}

/// One attempted monetary transaction tied to a booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique payment ID
    pub id: Uuid,

    /// The booking this payment settles
    pub booking_id: Uuid,

    /// Gateway transaction reference
    pub tx_ref: String,

    /// Amount charged
    pub amount: Price,

    /// Lifecycle status
    #[serde(default)]
    pub status: PaymentStatus,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Create a new pending payment with a generated ID
    pub fn new(booking_id: Uuid, tx_ref: impl Into<String>, amount: Price) -> Self {
        Self {
            id: Uuid::new_v4(),
            booking_id,
            tx_ref: tx_ref.into(),
            amount,
            status: PaymentStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// A payment still counts against the one-active-payment-per-booking
    /// rule until it fails.
    pub fn is_active(&self) -> bool {
        !matches!(self.status, PaymentStatus::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Price};

    #[test]
    fn test_booking_transitions() {
        let mut booking = Booking::new(Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(booking.status, BookingStatus::Pending);

        booking.confirm();
        assert!(booking.is_confirmed());

        let mut other = Booking::new(Uuid::new_v4(), Uuid::new_v4());
        other.cancel();
        assert_eq!(other.status, BookingStatus::Canceled);
    }

    #[test]
    fn test_payment_activity() {
        let mut payment = Payment::new(
            Uuid::new_v4(),
            "b-123",
            Price::new(500.0, Currency::ETB),
        );
        assert!(payment.is_active());

        payment.status = PaymentStatus::Completed;
        assert!(payment.is_active());

        payment.status = PaymentStatus::Failed;
        assert!(!payment.is_active());
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(BookingStatus::Confirmed.as_str(), "confirmed");
        assert_eq!(PaymentStatus::Completed.as_str(), "completed");
    }
}
