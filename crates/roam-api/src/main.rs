//! # Roamstay
//!
//! Travel-booking backend with Chapa payments.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export CHAPA_SECRET_KEY=CHASECK_TEST-...
//!
//! # Run the server
//! roamstay
//! ```

use roam_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Payment currency: {}", state.config.currency);

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("Roamstay starting on http://{}", addr);

    if !is_prod {
        info!("Health: GET http://{}/health", addr);
        info!("Initiate: POST http://{}/api/v1/payments/initiate", addr);
        info!("Verify: GET http://{}/api/v1/payments/{{id}}/verify", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
