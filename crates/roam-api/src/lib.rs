//! # roam-api
//!
//! HTTP API layer for roamstay.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for listings, bookings, reviews, and payments
//! - The booking/payment workflow controller
//! - The asynchronous notification dispatcher
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/v1/bookings` | Create booking (enqueues email) |
//! | POST | `/api/v1/payments/initiate` | Initiate gateway payment |
//! | GET | `/api/v1/payments/{id}/verify` | Verify and settle payment |

pub mod handlers;
pub mod notify;
pub mod routes;
pub mod state;
pub mod workflow;

pub use notify::Notifier;
pub use routes::create_router;
pub use state::{AppConfig, AppState};
pub use workflow::PaymentWorkflow;
