//! # roam-core
//!
//! Core types and traits for the roamstay booking backend.
//!
//! This crate provides:
//! - `PaymentGateway` trait for payment provider implementations
//! - `Store` trait and `MemoryStore` for record persistence
//! - `Mailer` trait for the notification transport
//! - `Listing`, `Booking`, `Payment`, `Review`, and `User` records
//! - `TravelError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use roam_core::{Booking, InitializeRequest, PaymentGateway, Price, Currency};
//!
//! // Build a gateway request for a booking
//! let request = InitializeRequest::new(
//!     Price::new(850.0, Currency::ETB),
//!     format!("{}-{}", booking.id, booking.guest_id),
//!     guest.email.clone(),
//!     guest.full_name(),
//! );
//!
//! // Initialize with whatever provider is configured
//! let tx = gateway.initialize(&request).await?;
//!
//! // Redirect the customer to tx.checkout_url
//! ```

pub mod booking;
pub mod error;
pub mod gateway;
pub mod listing;
pub mod mailer;
pub mod money;
pub mod store;
pub mod user;

// Re-exports for convenience
pub use booking::{Booking, BookingStatus, Payment, PaymentStatus};
pub use error::{TravelError, TravelResult};
pub use gateway::{
    BoxedPaymentGateway, InitializeRequest, InitializedTransaction, PaymentGateway,
    VerifyOutcome,
};
pub use listing::{Listing, Review};
pub use mailer::{BoxedMailer, EmailMessage, LoggingMailer, Mailer};
pub use money::{Currency, Price};
pub use store::{BoxedStore, MemoryStore, Store};
pub use user::{Role, User};
