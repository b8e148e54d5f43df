//! # Routes
//!
//! Axum router configuration for the roamstay API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /health - Health check
/// - POST /api/v1/users, GET /api/v1/users/{id}
/// - CRUD /api/v1/listings, reviews nested under a listing
/// - POST /api/v1/bookings (enqueues confirmation email), GET, DELETE
/// - GET  /api/v1/payments, /api/v1/payments/{id}
/// - POST /api/v1/payments/initiate - Start a gateway transaction
/// - GET  /api/v1/payments/{id}/verify - Confirm it and settle status
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - allow all origins for now
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let user_routes = Router::new()
        .route("/users", post(handlers::create_user))
        .route("/users/{user_id}", get(handlers::get_user));

    let listing_routes = Router::new()
        .route(
            "/listings",
            get(handlers::list_listings).post(handlers::create_listing),
        )
        .route(
            "/listings/{listing_id}",
            get(handlers::get_listing)
                .put(handlers::update_listing)
                .delete(handlers::delete_listing),
        )
        .route(
            "/listings/{listing_id}/reviews",
            get(handlers::list_reviews).post(handlers::create_review),
        );

    let booking_routes = Router::new()
        .route(
            "/bookings",
            get(handlers::list_bookings).post(handlers::create_booking),
        )
        .route(
            "/bookings/{booking_id}",
            get(handlers::get_booking).delete(handlers::cancel_booking),
        );

    let payment_routes = Router::new()
        .route("/payments", get(handlers::list_payments))
        .route("/payments/initiate", post(handlers::initiate_payment))
        .route("/payments/{payment_id}", get(handlers::get_payment))
        .route("/payments/{payment_id}/verify", get(handlers::verify_payment));

    let api_routes = Router::new()
        .merge(user_routes)
        .merge(listing_routes)
        .merge(booking_routes)
        .merge(payment_routes);

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // API v1
        .nest("/api/v1", api_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
