//! # Persistence Seam
//!
//! The `Store` trait is the boundary to whatever actually persists
//! records. `MemoryStore` is the in-process implementation used by the
//! server and the tests; a database-backed store would implement the same
//! trait.

use crate::booking::{Booking, Payment};
use crate::error::{TravelError, TravelResult};
use crate::listing::{Listing, Review};
use crate::user::User;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Storage operations for all record types
#[async_trait]
pub trait Store: Send + Sync {
    // Users
    async fn insert_user(&self, user: User) -> TravelResult<User>;
    async fn user(&self, id: Uuid) -> TravelResult<User>;

    // Listings
    async fn insert_listing(&self, listing: Listing) -> TravelResult<Listing>;
    async fn listing(&self, id: Uuid) -> TravelResult<Listing>;
    async fn listings(&self) -> TravelResult<Vec<Listing>>;
    async fn update_listing(&self, listing: Listing) -> TravelResult<Listing>;
    async fn delete_listing(&self, id: Uuid) -> TravelResult<()>;

    // Bookings
    async fn insert_booking(&self, booking: Booking) -> TravelResult<Booking>;
    async fn booking(&self, id: Uuid) -> TravelResult<Booking>;
    async fn bookings(&self) -> TravelResult<Vec<Booking>>;
    async fn update_booking(&self, booking: Booking) -> TravelResult<Booking>;

    // Payments
    async fn insert_payment(&self, payment: Payment) -> TravelResult<Payment>;
    async fn payment(&self, id: Uuid) -> TravelResult<Payment>;
    async fn payments(&self) -> TravelResult<Vec<Payment>>;
    async fn update_payment(&self, payment: Payment) -> TravelResult<Payment>;
    async fn payments_for_booking(&self, booking_id: Uuid) -> TravelResult<Vec<Payment>>;

    // Reviews
    async fn insert_review(&self, review: Review) -> TravelResult<Review>;
    async fn reviews_for_listing(&self, listing_id: Uuid) -> TravelResult<Vec<Review>>;
}

/// Type alias for a shared store (dynamic dispatch)
pub type BoxedStore = Arc<dyn Store>;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    listings: HashMap<Uuid, Listing>,
    bookings: HashMap<Uuid, Booking>,
    payments: HashMap<Uuid, Payment>,
    reviews: HashMap<Uuid, Review>,
}

/// In-memory store backed by a single `RwLock`
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Tables> {
        self.tables.read().expect("store lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Tables> {
        self.tables.write().expect("store lock poisoned")
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: User) -> TravelResult<User> {
        self.write().users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn user(&self, id: Uuid) -> TravelResult<User> {
        self.read()
            .users
            .get(&id)
            .cloned()
            .ok_or(TravelError::not_found("User", id))
    }

    async fn insert_listing(&self, listing: Listing) -> TravelResult<Listing> {
        self.write().listings.insert(listing.id, listing.clone());
        Ok(listing)
    }

    async fn listing(&self, id: Uuid) -> TravelResult<Listing> {
        self.read()
            .listings
            .get(&id)
            .cloned()
            .ok_or(TravelError::not_found("Listing", id))
    }

    async fn listings(&self) -> TravelResult<Vec<Listing>> {
        let mut all: Vec<Listing> = self.read().listings.values().cloned().collect();
        all.sort_by_key(|l| l.created_at);
        Ok(all)
    }

    async fn update_listing(&self, listing: Listing) -> TravelResult<Listing> {
        let mut tables = self.write();
        if !tables.listings.contains_key(&listing.id) {
            return Err(TravelError::not_found("Listing", listing.id));
        }
        tables.listings.insert(listing.id, listing.clone());
        Ok(listing)
    }

    async fn delete_listing(&self, id: Uuid) -> TravelResult<()> {
        self.write()
            .listings
            .remove(&id)
            .map(|_| ())
            .ok_or(TravelError::not_found("Listing", id))
    }

    async fn insert_booking(&self, booking: Booking) -> TravelResult<Booking> {
        self.write().bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn booking(&self, id: Uuid) -> TravelResult<Booking> {
        self.read()
            .bookings
            .get(&id)
            .cloned()
            .ok_or(TravelError::not_found("Booking", id))
    }

    async fn bookings(&self) -> TravelResult<Vec<Booking>> {
        let mut all: Vec<Booking> = self.read().bookings.values().cloned().collect();
        all.sort_by_key(|b| b.created_at);
        Ok(all)
    }

    async fn update_booking(&self, booking: Booking) -> TravelResult<Booking> {
        let mut tables = self.write();
        if !tables.bookings.contains_key(&booking.id) {
            return Err(TravelError::not_found("Booking", booking.id));
        }
        tables.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn insert_payment(&self, payment: Payment) -> TravelResult<Payment> {
        self.write().payments.insert(payment.id, payment.clone());
        Ok(payment)
    }

    async fn payment(&self, id: Uuid) -> TravelResult<Payment> {
        self.read()
            .payments
            .get(&id)
            .cloned()
            .ok_or(TravelError::not_found("Payment", id))
    }

    async fn payments(&self) -> TravelResult<Vec<Payment>> {
        let mut all: Vec<Payment> = self.read().payments.values().cloned().collect();
        all.sort_by_key(|p| p.created_at);
        Ok(all)
    }

    async fn update_payment(&self, payment: Payment) -> TravelResult<Payment> {
        let mut tables = self.write();
        if !tables.payments.contains_key(&payment.id) {
            return Err(TravelError::not_found("Payment", payment.id));
        }
        tables.payments.insert(payment.id, payment.clone());
        Ok(payment)
    }

    async fn payments_for_booking(&self, booking_id: Uuid) -> TravelResult<Vec<Payment>> {
        let mut matching: Vec<Payment> = self
            .read()
            .payments
            .values()
            .filter(|p| p.booking_id == booking_id)
            .cloned()
            .collect();
        matching.sort_by_key(|p| p.created_at);
        Ok(matching)
    }

    async fn insert_review(&self, review: Review) -> TravelResult<Review> {
        self.write().reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn reviews_for_listing(&self, listing_id: Uuid) -> TravelResult<Vec<Review>> {
        let mut matching: Vec<Review> = self
            .read()
            .reviews
            .values()
            .filter(|r| r.listing_id == listing_id)
            .cloned()
            .collect();
        matching.sort_by_key(|r| r.created_at);
        Ok(matching)
    }
}
