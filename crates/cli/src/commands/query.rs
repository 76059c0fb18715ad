use anyhow::Result;
use kql_assist_backend::{ProxyClient, QueryExecutor};
use kql_assist_core::Credentials;

use crate::get_proxy_url;

pub(crate) async fn run(kql: String, credentials: Credentials) -> Result<()> {
    let proxy = ProxyClient::new(&get_proxy_url())?;
    tracing::info!(proxy = %proxy.base_url(), app_id = %credentials.app_id, "sending query");
    match proxy.execute(&kql, &credentials).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        },
        Err(e) => anyhow::bail!("{}", e.detail()),
    }
}
