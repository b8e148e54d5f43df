//! # roam-chapa
//!
//! Chapa payment gateway client for roamstay.
//!
//! Chapa hosts the checkout page; this crate initializes transactions and
//! verifies their outcome via the pull-based verify endpoint.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roam_chapa::ChapaGateway;
//! use roam_core::{InitializeRequest, PaymentGateway};
//!
//! // Create gateway from environment (CHAPA_SECRET_KEY)
//! let gateway = ChapaGateway::from_env()?;
//!
//! // Initialize a transaction
//! let tx = gateway.initialize(&request).await?;
//!
//! // Redirect the customer to tx.checkout_url, then later:
//! let outcome = gateway.verify(&tx.tx_ref).await?;
//! ```

pub mod client;
pub mod config;

// Re-exports
pub use client::ChapaGateway;
pub use config::ChapaConfig;
