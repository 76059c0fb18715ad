use anyhow::Result;
use kql_assist_backend::{AppInsightsClient, QueryExecutor};
use kql_assist_http::{AppState, create_router};
use std::sync::Arc;

use crate::get_appinsights_url;

use super::build_conversation;

pub(crate) async fn run(port: u16, host: String) -> Result<()> {
    let appinsights = Arc::new(AppInsightsClient::new(&get_appinsights_url())?);
    tracing::info!("Forwarding queries to {}", appinsights.base_url());

    // The chat route runs confirmed queries in-process through the same client.
    let conversation = match build_conversation(Arc::clone(&appinsights) as Arc<dyn QueryExecutor>) {
        Ok(conversation) => Some(conversation),
        Err(e) => {
            tracing::warn!("Chat endpoint disabled: {e}");
            None
        },
    };

    let state = Arc::new(AppState { appinsights, conversation });
    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
