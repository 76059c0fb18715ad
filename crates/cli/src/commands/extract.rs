use anyhow::Result;
use kql_assist_core::{AgentOutput, extract_kql};
use tokio::io::AsyncReadExt;

/// Reads an agent response from stdin and prints the extracted KQL.
///
/// JSON input is treated as an agent invocation result (`output` / `content`
/// keys are honoured); anything else is raw text.
pub(crate) async fn run() -> Result<()> {
    let mut input = String::new();
    tokio::io::stdin().read_to_string(&mut input).await?;

    let output = match serde_json::from_str::<serde_json::Value>(&input) {
        Ok(value @ serde_json::Value::Object(_)) => AgentOutput::from_invocation(value),
        _ => AgentOutput::Raw(input),
    };
    println!("{}", extract_kql(&output));
    Ok(())
}
