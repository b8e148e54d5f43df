//! # Chapa Gateway Client
//!
//! Implementation of the Chapa transaction API: initialize a hosted
//! checkout and verify its outcome. Both calls are bearer-token
//! authenticated JSON over HTTPS.

use crate::config::ChapaConfig;
use async_trait::async_trait;
use reqwest::Client;
use roam_core::{
    InitializeRequest, InitializedTransaction, PaymentGateway, TravelError, TravelResult,
    VerifyOutcome,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "chapa";

/// Chapa payment gateway
///
/// Uses Chapa's hosted checkout page. The customer is redirected to the
/// returned checkout URL and the charge is later confirmed through the
/// pull-based verify endpoint.
pub struct ChapaGateway {
    config: ChapaConfig,
    client: Client,
}

impl ChapaGateway {
    /// Create a new Chapa gateway
    pub fn new(config: ChapaConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> TravelResult<Self> {
        let config = ChapaConfig::from_env()?;
        Ok(Self::new(config))
    }

    fn build_payload(&self, request: &InitializeRequest) -> ChapaInitPayload {
        ChapaInitPayload {
            amount: request.amount.to_wire(),
            currency: self.config.currency.as_str().to_string(),
            tx_ref: request.tx_ref.clone(),
            callback_url: self.config.callback_url.clone(),
            return_url: self.config.return_url.clone(),
            customization: ChapaCustomization {
                title: request.title.clone(),
                description: request.description.clone(),
            },
            customer: ChapaCustomer {
                email: request.customer_email.clone(),
                name: request.customer_name.clone(),
            },
        }
    }
}

#[async_trait]
impl PaymentGateway for ChapaGateway {
    #[instrument(skip(self, request), fields(tx_ref = %request.tx_ref))]
    async fn initialize(
        &self,
        request: &InitializeRequest,
    ) -> TravelResult<InitializedTransaction> {
        let payload = self.build_payload(request);
        let url = format!("{}/v1/transaction/initialize", self.config.api_base_url);

        debug!("Initializing Chapa transaction: amount={}", payload.amount);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .json(&payload)
            .send()
            .await
            .map_err(|e| TravelError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TravelError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Chapa API error: status={}, body={}", status, body);
            return Err(TravelError::Gateway {
                provider: PROVIDER.to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let parsed: ChapaResponse<ChapaInitData> =
            serde_json::from_str(&body).map_err(|e| TravelError::Gateway {
                provider: PROVIDER.to_string(),
                message: format!("Failed to parse initialize response: {}", e),
            })?;

        if parsed.status != "success" {
            return Err(TravelError::Declined {
                provider: PROVIDER.to_string(),
                message: parsed
                    .message
                    .unwrap_or_else(|| "payment initiation failed".to_string()),
            });
        }

        let data = parsed.data.ok_or_else(|| TravelError::Gateway {
            provider: PROVIDER.to_string(),
            message: "initialize response missing data".to_string(),
        })?;

        // Chapa echoes the merchant tx_ref; keep ours if the echo is absent.
        let tx_ref = data.tx_ref.unwrap_or_else(|| request.tx_ref.clone());

        info!(
            "Initialized Chapa transaction: tx_ref={}, checkout_url={}",
            tx_ref, data.checkout_url
        );

        Ok(InitializedTransaction {
            tx_ref,
            checkout_url: data.checkout_url,
        })
    }

    #[instrument(skip(self))]
    async fn verify(&self, tx_ref: &str) -> TravelResult<VerifyOutcome> {
        let url = format!(
            "{}/v1/transaction/verify/{}",
            self.config.api_base_url, tx_ref
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.config.auth_header())
            .send()
            .await
            .map_err(|e| TravelError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TravelError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Chapa API error: status={}, body={}", status, body);
            return Err(TravelError::Gateway {
                provider: PROVIDER.to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let parsed: ChapaResponse<serde_json::Value> =
            serde_json::from_str(&body).map_err(|e| TravelError::Gateway {
                provider: PROVIDER.to_string(),
                message: format!("Failed to parse verify response: {}", e),
            })?;

        debug!("Chapa verify result: status={}", parsed.status);

        if parsed.status == "success" {
            Ok(VerifyOutcome::Success)
        } else {
            Ok(VerifyOutcome::Failed(parsed.status))
        }
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Chapa API Types
// =============================================================================

#[derive(Debug, Serialize)]
struct ChapaInitPayload {
    amount: String,
    currency: String,
    tx_ref: String,
    callback_url: String,
    return_url: String,
    customization: ChapaCustomization,
    customer: ChapaCustomer,
}

#[derive(Debug, Serialize)]
struct ChapaCustomization {
    title: String,
    description: String,
}

#[derive(Debug, Serialize)]
struct ChapaCustomer {
    email: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ChapaResponse<T> {
    status: String,
    message: Option<String>,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct ChapaInitData {
    checkout_url: String,
    tx_ref: Option<String>,
}
