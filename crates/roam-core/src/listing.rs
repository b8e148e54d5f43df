//! # Listing and Review Types
//!
//! A listing is a bookable property owned by a host. Reviews are written
//! by guests against listings, and only for bookings that were confirmed.

use crate::error::{TravelError, TravelResult};
use crate::money::Price;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Unique listing ID
    pub id: Uuid,

    /// Owning host
    pub host_id: Uuid,

    /// Display name
    pub name: String,

    /// Short description
    pub description: String,

    /// Location (free-form city/area)
    pub location: String,

    /// Nightly price
    pub price_per_night: Price,

    /// Created timestamp
    pub created_at: DateTime<Utc>,

    /// Last-updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Create a new listing with a generated ID
    pub fn new(
        host_id: Uuid,
        name: impl Into<String>,
        location: impl Into<String>,
        price_per_night: Price,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            host_id,
            name: name.into(),
            description: String::new(),
            location: location.into(),
            price_per_night,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }
}

/// A guest review of a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Unique review ID
    pub id: Uuid,

    /// Reviewed listing
    pub listing_id: Uuid,

    /// Authoring guest
    pub guest_id: Uuid,

    /// Rating, 1 through 5
    pub rating: u8,

    pub comment: String,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Create a new review. Rating must be within 1..=5.
    pub fn new(
        listing_id: Uuid,
        guest_id: Uuid,
        rating: u8,
        comment: impl Into<String>,
    ) -> TravelResult<Self> {
        if !(1..=5).contains(&rating) {
            return Err(TravelError::Validation(format!(
                "rating must be between 1 and 5, got {}",
                rating
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            listing_id,
            guest_id,
            rating,
            comment: comment.into(),
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_listing_builder() {
        let host = Uuid::new_v4();
        let listing = Listing::new(
            host,
            "Lakeside Cottage",
            "Bahir Dar",
            Price::new(850.0, Currency::ETB),
        )
        .with_description("Two-bedroom cottage on Lake Tana");

        assert_eq!(listing.host_id, host);
        assert_eq!(listing.price_per_night.to_wire(), "850.00");
        assert!(!listing.description.is_empty());
    }

    #[test]
    fn test_review_rating_bounds() {
        let listing = Uuid::new_v4();
        let guest = Uuid::new_v4();

        assert!(Review::new(listing, guest, 0, "too low").is_err());
        assert!(Review::new(listing, guest, 6, "too high").is_err());

        let review = Review::new(listing, guest, 5, "wonderful stay").unwrap();
        assert_eq!(review.rating, 5);
    }
}
