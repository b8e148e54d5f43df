//! # Request Handlers
//!
//! Axum request handlers for the roamstay API: CRUD over users,
//! listings, bookings, reviews, and payments, plus the two payment
//! workflow actions (initiate, verify).

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use roam_core::{
    Booking, Currency, Listing, Price, Review, Role, TravelError, User,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use uuid::Uuid;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn travel_error_to_response(err: TravelError) -> ApiError {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

/// Create user request
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Create listing request
#[derive(Debug, Deserialize)]
pub struct CreateListingRequest {
    pub host_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub location: String,
    pub price_per_night: f64,
    #[serde(default)]
    pub currency: Option<Currency>,
}

/// Update listing request (all fields optional)
#[derive(Debug, Deserialize)]
pub struct UpdateListingRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub price_per_night: Option<f64>,
}

/// Create booking request
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub listing_id: Uuid,
    pub guest_id: Uuid,
}

/// Create review request
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    /// The confirmed booking the review is based on
    pub booking_id: Uuid,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

/// Initiate payment request.
///
/// Fields are optional so that missing input is answered with a 400
/// rather than a deserialization error.
#[derive(Debug, Deserialize)]
pub struct InitiatePaymentRequest {
    #[serde(default)]
    pub booking_id: Option<Uuid>,
    #[serde(default)]
    pub amount: Option<f64>,
}

/// Initiate payment response
#[derive(Debug, Serialize)]
pub struct InitiatePaymentResponse {
    pub message: String,
    pub checkout_url: String,
    pub tx_ref: String,
    pub payment_id: Uuid,
    pub status: String,
}

/// Verify payment response
#[derive(Debug, Serialize)]
pub struct VerifyPaymentResponse {
    pub message: String,
    pub payment_id: Uuid,
    pub status: String,
}

// =============================================================================
// Health
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "roamstay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// =============================================================================
// Users
// =============================================================================

/// Create a user (registration proper is out of scope)
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    if request.email.trim().is_empty() {
        return Err(travel_error_to_response(TravelError::Validation(
            "email is required".to_string(),
        )));
    }

    let mut user = User::new(
        request.first_name,
        request.last_name,
        request.email,
        request.role,
    );
    if let Some(phone) = request.phone_number {
        user = user.with_phone(phone);
    }

    let user = state
        .store
        .insert_user(user)
        .await
        .map_err(travel_error_to_response)?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .store
        .user(user_id)
        .await
        .map_err(travel_error_to_response)?;
    Ok(Json(user))
}

// =============================================================================
// Listings
// =============================================================================

/// Create a listing
#[instrument(skip(state, request), fields(host_id = %request.host_id))]
pub async fn create_listing(
    State(state): State<AppState>,
    Json(request): Json<CreateListingRequest>,
) -> Result<(StatusCode, Json<Listing>), ApiError> {
    if request.price_per_night <= 0.0 {
        return Err(travel_error_to_response(TravelError::Validation(
            "price_per_night must be greater than zero".to_string(),
        )));
    }

    let host = state
        .store
        .user(request.host_id)
        .await
        .map_err(travel_error_to_response)?;
    if !host.is_host() {
        return Err(travel_error_to_response(TravelError::Validation(
            format!("user {} is not a host", host.id),
        )));
    }

    let currency = request.currency.unwrap_or(state.config.currency);
    let mut listing = Listing::new(
        host.id,
        request.name,
        request.location,
        Price::new(request.price_per_night, currency),
    );
    if let Some(desc) = request.description {
        listing = listing.with_description(desc);
    }

    let listing = state
        .store
        .insert_listing(listing)
        .await
        .map_err(travel_error_to_response)?;

    info!("Listing created: {}", listing.id);

    Ok((StatusCode::CREATED, Json(listing)))
}

/// List all listings
pub async fn list_listings(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let listings = state
        .store
        .listings()
        .await
        .map_err(travel_error_to_response)?;
    Ok(Json(serde_json::json!({
        "listings": listings,
        "count": listings.len()
    })))
}

/// Get a single listing
pub async fn get_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
) -> Result<Json<Listing>, ApiError> {
    let listing = state
        .store
        .listing(listing_id)
        .await
        .map_err(travel_error_to_response)?;
    Ok(Json(listing))
}

/// Update a listing
pub async fn update_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
    Json(request): Json<UpdateListingRequest>,
) -> Result<Json<Listing>, ApiError> {
    let mut listing = state
        .store
        .listing(listing_id)
        .await
        .map_err(travel_error_to_response)?;

    if let Some(name) = request.name {
        listing.name = name;
    }
    if let Some(desc) = request.description {
        listing.description = desc;
    }
    if let Some(location) = request.location {
        listing.location = location;
    }
    if let Some(price) = request.price_per_night {
        if price <= 0.0 {
            return Err(travel_error_to_response(TravelError::Validation(
                "price_per_night must be greater than zero".to_string(),
            )));
        }
        listing.price_per_night = Price::new(price, listing.price_per_night.currency);
    }
    listing.updated_at = chrono::Utc::now();

    let listing = state
        .store
        .update_listing(listing)
        .await
        .map_err(travel_error_to_response)?;

    Ok(Json(listing))
}

/// Delete a listing
pub async fn delete_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .delete_listing(listing_id)
        .await
        .map_err(travel_error_to_response)?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Reviews
// =============================================================================

/// Create a review for a listing. Requires a confirmed booking on that
/// listing; the review is attributed to the booking's guest.
#[instrument(skip(state, request), fields(listing_id = %listing_id))]
pub async fn create_review(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
    Json(request): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let listing = state
        .store
        .listing(listing_id)
        .await
        .map_err(travel_error_to_response)?;

    let booking = state
        .store
        .booking(request.booking_id)
        .await
        .map_err(travel_error_to_response)?;

    if booking.listing_id != listing.id {
        return Err(travel_error_to_response(TravelError::Validation(format!(
            "booking {} is not for listing {}",
            booking.id, listing.id
        ))));
    }
    if !booking.is_confirmed() {
        return Err(travel_error_to_response(TravelError::Validation(format!(
            "booking {} is not confirmed",
            booking.id
        ))));
    }

    let review = Review::new(listing.id, booking.guest_id, request.rating, request.comment)
        .map_err(travel_error_to_response)?;

    let review = state
        .store
        .insert_review(review)
        .await
        .map_err(travel_error_to_response)?;

    Ok((StatusCode::CREATED, Json(review)))
}

/// List reviews for a listing
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let reviews = state
        .store
        .reviews_for_listing(listing_id)
        .await
        .map_err(travel_error_to_response)?;
    Ok(Json(serde_json::json!({
        "listing_id": listing_id,
        "reviews": reviews,
        "count": reviews.len()
    })))
}

// =============================================================================
// Bookings
// =============================================================================

/// Create a booking. Enqueues a booking-confirmation email; the response
/// does not wait for delivery.
#[instrument(skip(state, request), fields(listing_id = %request.listing_id))]
pub async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let listing = state
        .store
        .listing(request.listing_id)
        .await
        .map_err(travel_error_to_response)?;
    let guest = state
        .store
        .user(request.guest_id)
        .await
        .map_err(travel_error_to_response)?;

    let booking = state
        .store
        .insert_booking(Booking::new(listing.id, guest.id))
        .await
        .map_err(travel_error_to_response)?;

    info!("Booking created: {}", booking.id);

    state.notifier.spawn_booking_confirmation(booking.id);

    Ok((StatusCode::CREATED, Json(booking)))
}

/// List all bookings
pub async fn list_bookings(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let bookings = state
        .store
        .bookings()
        .await
        .map_err(travel_error_to_response)?;
    Ok(Json(serde_json::json!({
        "bookings": bookings,
        "count": bookings.len()
    })))
}

/// Get a single booking
pub async fn get_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<Booking>, ApiError> {
    let booking = state
        .store
        .booking(booking_id)
        .await
        .map_err(travel_error_to_response)?;
    Ok(Json(booking))
}

/// Cancel a booking
pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<Booking>, ApiError> {
    let mut booking = state
        .store
        .booking(booking_id)
        .await
        .map_err(travel_error_to_response)?;

    booking.cancel();
    let booking = state
        .store
        .update_booking(booking)
        .await
        .map_err(travel_error_to_response)?;

    info!("Booking canceled: {}", booking.id);

    Ok(Json(booking))
}

// =============================================================================
// Payments
// =============================================================================

/// List all payments
pub async fn list_payments(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let payments = state
        .store
        .payments()
        .await
        .map_err(travel_error_to_response)?;
    Ok(Json(serde_json::json!({
        "payments": payments,
        "count": payments.len()
    })))
}

/// Get a single payment
pub async fn get_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<Uuid>,
) -> Result<Json<roam_core::Payment>, ApiError> {
    let payment = state
        .store
        .payment(payment_id)
        .await
        .map_err(travel_error_to_response)?;
    Ok(Json(payment))
}

/// Initiate a payment for a booking via the gateway
#[instrument(skip(state, request))]
pub async fn initiate_payment(
    State(state): State<AppState>,
    Json(request): Json<InitiatePaymentRequest>,
) -> Result<(StatusCode, Json<InitiatePaymentResponse>), ApiError> {
    let initiated = state
        .workflow
        .initiate(request.booking_id, request.amount)
        .await
        .map_err(|e| {
            error!("Failed to initiate payment: {}", e);
            travel_error_to_response(e)
        })?;

    Ok((
        StatusCode::CREATED,
        Json(InitiatePaymentResponse {
            message: "Payment initiated successfully.".to_string(),
            checkout_url: initiated.checkout_url,
            tx_ref: initiated.tx_ref,
            payment_id: initiated.payment_id,
            status: initiated.status.as_str().to_string(),
        }),
    ))
}

/// Verify a payment with the gateway and update its status
#[instrument(skip(state))]
pub async fn verify_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<Uuid>,
) -> Result<(StatusCode, Json<VerifyPaymentResponse>), ApiError> {
    let verified = state.workflow.verify(payment_id).await.map_err(|e| {
        error!("Failed to verify payment: {}", e);
        travel_error_to_response(e)
    })?;

    if verified.is_completed() {
        Ok((
            StatusCode::OK,
            Json(VerifyPaymentResponse {
                message: "Payment verified successfully.".to_string(),
                payment_id: verified.payment_id,
                status: verified.status.as_str().to_string(),
            }),
        ))
    } else {
        Ok((
            StatusCode::BAD_REQUEST,
            Json(VerifyPaymentResponse {
                message: "Payment verification failed.".to_string(),
                payment_id: verified.payment_id,
                status: verified.status.as_str().to_string(),
            }),
        ))
    }
}
