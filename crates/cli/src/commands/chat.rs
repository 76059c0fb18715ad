use std::sync::Arc;

use anyhow::Result;
use kql_assist_backend::{AppInsightsClient, ProxyClient, QueryExecutor};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::{get_appinsights_url, get_proxy_url};

use super::build_conversation;

const EXIT_WORDS: [&str; 2] = ["exit", "quit"];

pub(crate) async fn run(user: Option<String>, direct: bool) -> Result<()> {
    let executor: Arc<dyn QueryExecutor> = if direct {
        Arc::new(AppInsightsClient::new(&get_appinsights_url())?)
    } else {
        Arc::new(ProxyClient::new(&get_proxy_url())?)
    };
    let conversation = build_conversation(executor)?;
    let user_id = user.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    tracing::info!(user_id = %user_id, direct, "chat session started");

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(b"Ask a question about your Application Insights telemetry (\"exit\" to quit).\n")
        .await?;
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let message = line.trim();
        if EXIT_WORDS.contains(&message.to_lowercase().as_str()) {
            break;
        }
        if message.is_empty() && !conversation.session(&user_id).await.is_awaiting_confirmation() {
            continue;
        }

        let text = match conversation.handle_message(&user_id, message).await {
            Ok(reply) => reply.to_string(),
            Err(e) => format!("Error: {e}"),
        };
        stdout.write_all(text.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
    }

    Ok(())
}
