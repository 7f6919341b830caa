//! HTTP surface: request schema, API-key check, and the persona reply.
//!
//! The handler is a thin wrapper; all decisions live in `pipeline`.

pub mod routes;
pub mod schema;

pub use routes::{AppState, agent_reply, honeypot_routes};
pub use schema::{HoneypotResponse, Message, ScamRequest};

use tracing::info;

use crate::config::HoneypotConfig;
use crate::pipeline::TurnOrchestrator;

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: HoneypotConfig) -> crate::error::Result<()> {
    let orchestrator = TurnOrchestrator::from_config(&config);
    let app = honeypot_routes(orchestrator, config.api_key.clone());

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(addr = %config.listen_addr, "Honeypot server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
