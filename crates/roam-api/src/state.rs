//! # Application State
//!
//! Shared state for the axum application: the store, the payment
//! workflow, and the notification dispatcher.

use crate::notify::Notifier;
use crate::workflow::PaymentWorkflow;
use roam_chapa::ChapaGateway;
use roam_core::{
    BoxedMailer, BoxedPaymentGateway, BoxedStore, Currency, LoggingMailer, MemoryStore,
};
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Currency payments are initiated in
    pub currency: Currency,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            currency: Currency::ETB,
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Record persistence
    pub store: BoxedStore,
    /// Booking/payment workflow controller
    pub workflow: PaymentWorkflow,
    /// Notification dispatcher
    pub notifier: Notifier,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create state with the Chapa gateway and in-memory store
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let gateway = ChapaGateway::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Chapa: {}", e))?;

        Ok(Self::with_parts(
            Arc::new(MemoryStore::new()),
            Arc::new(gateway),
            Arc::new(LoggingMailer),
            config,
        ))
    }

    /// Assemble state from explicit collaborators (used by tests)
    pub fn with_parts(
        store: BoxedStore,
        gateway: BoxedPaymentGateway,
        mailer: BoxedMailer,
        config: AppConfig,
    ) -> Self {
        let notifier = Notifier::new(store.clone(), mailer);
        let workflow = PaymentWorkflow::new(
            store.clone(),
            gateway,
            notifier.clone(),
            config.currency,
        );

        Self {
            store,
            workflow,
            notifier,
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");

        let config = AppConfig::from_env();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.currency, Currency::ETB);
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "test".to_string(),
            currency: Currency::ETB,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }
}
