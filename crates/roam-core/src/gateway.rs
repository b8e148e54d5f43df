//! # Payment Gateway Trait
//!
//! Strategy trait for payment providers. The workflow controller only
//! speaks this trait; the concrete Chapa client lives in `roam-chapa`.

use crate::error::TravelResult;
use crate::money::Price;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request to initialize a transaction with the gateway
#[derive(Debug, Clone, Serialize)]
pub struct InitializeRequest {
    /// Amount to charge
    pub amount: Price,

    /// Merchant transaction reference (e.g. `{booking_id}-{guest_id}`)
    pub tx_ref: String,

    /// Customer email
    pub customer_email: String,

    /// Customer display name
    pub customer_name: String,

    /// Payment title shown on the hosted checkout page
    pub title: String,

    /// Payment description shown on the hosted checkout page
    pub description: String,
}

impl InitializeRequest {
    pub fn new(
        amount: Price,
        tx_ref: impl Into<String>,
        customer_email: impl Into<String>,
        customer_name: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            tx_ref: tx_ref.into(),
            customer_email: customer_email.into(),
            customer_name: customer_name.into(),
            title: "Booking Payment".to_string(),
            description: String::new(),
        }
    }

    /// Builder: set checkout description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }
}

/// A transaction accepted by the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializedTransaction {
    /// Transaction reference the verify endpoint expects
    pub tx_ref: String,

    /// Hosted checkout URL to redirect the customer to
    pub checkout_url: String,
}

/// Result of asking the gateway to verify a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerifyOutcome {
    /// The gateway confirmed the charge
    Success,
    /// The gateway reported the transaction unsettled or failed,
    /// carrying its status string
    Failed(String),
}

impl VerifyOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, VerifyOutcome::Success)
    }
}

/// Core trait for payment provider implementations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Initialize a transaction and obtain a hosted checkout URL.
    async fn initialize(
        &self,
        request: &InitializeRequest,
    ) -> TravelResult<InitializedTransaction>;

    /// Verify the state of a previously initialized transaction.
    ///
    /// Connectivity or malformed-response failures surface as `Err`;
    /// a reachable gateway that reports the charge unsettled returns
    /// `Ok(VerifyOutcome::Failed)`.
    async fn verify(&self, tx_ref: &str) -> TravelResult<VerifyOutcome>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_initialize_request_builder() {
        let request = InitializeRequest::new(
            Price::new(850.0, Currency::ETB),
            "bk-1-guest-1",
            "abel@example.com",
            "Abel Tesfaye",
        )
        .with_description("Payment for booking bk-1");

        assert_eq!(request.tx_ref, "bk-1-guest-1");
        assert_eq!(request.title, "Booking Payment");
        assert_eq!(request.amount.to_wire(), "850.00");
    }

    #[test]
    fn test_verify_outcome() {
        assert!(VerifyOutcome::Success.is_success());
        assert!(!VerifyOutcome::Failed("pending".into()).is_success());
    }
}
