use anyhow::Result;
use clap::{Parser, Subcommand};
use kql_assist_core::constants::{DEFAULT_APPINSIGHTS_API_URL, DEFAULT_LLM_URL, DEFAULT_PROXY_URL};
use kql_assist_core::{Credentials, env_flag, env_string_with_default};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "kql-assist")]
#[command(
    about = "Ask Application Insights questions in plain language, confirm the generated KQL, run it",
    long_about = None,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (query proxy and chat endpoint)
    Serve {
        #[arg(short, long, default_value = "8000")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Interactive chat: ask a question, confirm the query with yes/no
    Chat {
        /// Conversation identity; a random one is used when omitted
        #[arg(short, long)]
        user: Option<String>,
        /// Query Application Insights directly instead of going through the proxy
        #[arg(long)]
        direct: bool,
    },
    /// Read an agent response from stdin and print the extracted KQL
    Extract,
    /// Send a KQL query through the proxy and print the JSON result
    Query {
        kql: String,
        #[arg(long, env = "APPINSIGHTS_APP_ID")]
        app_id: String,
        #[arg(long, env = "APPINSIGHTS_API_KEY", hide_env_values = true)]
        api_key: String,
    },
}

pub(crate) fn get_llm_api_key() -> Result<String> {
    std::env::var("KQL_ASSIST_LLM_API_KEY").or_else(|_| std::env::var("OPENAI_API_KEY")).map_err(
        |_| anyhow::anyhow!("KQL_ASSIST_LLM_API_KEY or OPENAI_API_KEY environment variable must be set"),
    )
}

pub(crate) fn get_llm_url() -> String {
    env_string_with_default("KQL_ASSIST_LLM_URL", DEFAULT_LLM_URL)
}

pub(crate) fn get_appinsights_url() -> String {
    env_string_with_default("APPINSIGHTS_API_URL", DEFAULT_APPINSIGHTS_API_URL)
}

pub(crate) fn get_proxy_url() -> String {
    env_string_with_default("KQL_ASSIST_PROXY_URL", DEFAULT_PROXY_URL)
}

pub(crate) fn get_credentials() -> Result<Credentials> {
    let app_id = std::env::var("APPINSIGHTS_APP_ID")
        .map_err(|_| anyhow::anyhow!("APPINSIGHTS_APP_ID environment variable must be set"))?;
    let api_key = std::env::var("APPINSIGHTS_API_KEY")
        .map_err(|_| anyhow::anyhow!("APPINSIGHTS_API_KEY environment variable must be set"))?;
    Ok(Credentials::new(app_id, api_key))
}

pub(crate) fn reprocess_rejected() -> bool {
    env_flag("KQL_ASSIST_REPROCESS_REJECTED", false)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(port, host).await?,
        Commands::Chat { user, direct } => commands::chat::run(user, direct).await?,
        Commands::Extract => commands::extract::run().await?,
        Commands::Query { kql, app_id, api_key } => {
            commands::query::run(kql, Credentials::new(app_id, api_key)).await?;
        },
    }

    Ok(())
}
