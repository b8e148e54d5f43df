//! # Chapa Configuration
//!
//! Configuration management for the Chapa integration.
//! All secrets are loaded from environment variables.

use roam_core::{Currency, TravelError};
use std::env;

/// Chapa API configuration
#[derive(Debug, Clone)]
pub struct ChapaConfig {
    /// Secret API key (CHASECK_TEST-... or CHASECK-...)
    pub secret_key: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// Currency all transactions are initialized in
    pub currency: Currency,

    /// URL Chapa calls back after the customer pays
    pub callback_url: String,

    /// URL the customer is returned to after checkout
    pub return_url: String,
}

impl ChapaConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `CHAPA_SECRET_KEY`
    ///
    /// Optional:
    /// - `CHAPA_API_BASE_URL` (defaults to the production API)
    /// - `CHAPA_CALLBACK_URL`, `CHAPA_RETURN_URL`
    pub fn from_env() -> Result<Self, TravelError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let secret_key = env::var("CHAPA_SECRET_KEY").map_err(|_| {
            TravelError::Configuration("CHAPA_SECRET_KEY not set".to_string())
        })?;

        if secret_key.trim().is_empty() {
            return Err(TravelError::Configuration(
                "CHAPA_SECRET_KEY is empty".to_string(),
            ));
        }

        let api_base_url = env::var("CHAPA_API_BASE_URL")
            .unwrap_or_else(|_| "https://api.chapa.co".to_string());

        let callback_url = env::var("CHAPA_CALLBACK_URL")
            .unwrap_or_else(|_| "https://roamstay.io/api/v1/payments/callback".to_string());

        let return_url = env::var("CHAPA_RETURN_URL")
            .unwrap_or_else(|_| "https://roamstay.io/payments/success".to_string());

        Ok(Self {
            secret_key,
            api_base_url,
            currency: Currency::ETB,
            callback_url,
            return_url,
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base_url: "https://api.chapa.co".to_string(),
            currency: Currency::ETB,
            callback_url: "https://roamstay.io/api/v1/payments/callback".to_string(),
            return_url: "https://roamstay.io/payments/success".to_string(),
        }
    }

    /// Check if using a test key
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("CHASECK_TEST-")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: set transaction currency
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_mode_detection() {
        let config = ChapaConfig::new("CHASECK_TEST-abc123");
        assert!(config.is_test_mode());

        let live = ChapaConfig::new("CHASECK-abc123");
        assert!(!live.is_test_mode());
    }

    #[test]
    fn test_auth_header() {
        let config = ChapaConfig::new("CHASECK_TEST-abc123");
        assert_eq!(config.auth_header(), "Bearer CHASECK_TEST-abc123");
    }

    #[test]
    fn test_base_url_override() {
        let config = ChapaConfig::new("CHASECK_TEST-abc")
            .with_api_base_url("http://127.0.0.1:9000");
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.currency, Currency::ETB);
    }
}
