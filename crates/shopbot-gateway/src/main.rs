//! shopbot: WhatsApp shop assistant gateway
//!
//! Usage:
//!   shopbot           - Start the webhook server
//!   shopbot --cli     - Interactive assistant chat (no WhatsApp needed)
//!   shopbot --help    - Show help

mod cli;
mod handler;
mod session;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use shopbot_assistant::ShopAssistant;
use shopbot_core::{Config, CostLedger, LlmClient};
use shopbot_momo::{Environment, MomoClient};
use shopbot_whatsapp::{GreenClient, WebhookServer};

use handler::ShopHandler;

/// Run mode
enum RunMode {
    /// Webhook server mode
    Server,
    /// Interactive CLI mode
    Cli,
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mode = parse_args();

    match mode {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("shopbot {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    dotenvy::dotenv().ok();

    let config = Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting shopbot...");
    tracing::info!("Model: {}", config.llm.model);

    let llm_client =
        LlmClient::new(&config.llm).map_err(|e| anyhow::anyhow!("Failed to create LLM client: {}", e))?;

    let ledger = CostLedger::new();
    let assistant = Arc::new(ShopAssistant::new(llm_client, ledger.clone()));

    match mode {
        RunMode::Cli => {
            tracing::info!("Running in CLI mode");
            let momo_client = momo_client(&config)?;
            cli::run_cli(assistant, ledger, momo_client).await
        }
        RunMode::Server => run_server(config, assistant).await,
        _ => Ok(()),
    }
}

/// Build the payment client when credentials are configured
fn momo_client(config: &Config) -> anyhow::Result<Option<MomoClient>> {
    let Some(momo) = &config.momo else {
        return Ok(None);
    };

    let client = MomoClient::new(
        &momo.api_key,
        &momo.user_id,
        &momo.primary_key,
        Environment::parse(&momo.environment),
    )
    .map_err(|e| anyhow::anyhow!("Failed to create payment client: {}", e))?;

    Ok(Some(client))
}

fn parse_args() -> RunMode {
    let args: Vec<String> = std::env::args().collect();

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--cli" | "-c" => return RunMode::Cli,
            "--help" | "-h" => return RunMode::Help,
            "--version" | "-v" => return RunMode::Version,
            _ => {}
        }
    }

    RunMode::Server
}

fn print_help() {
    println!("shopbot - WhatsApp shop assistant gateway");
    println!();
    println!("Usage:");
    println!("  shopbot           Start the webhook server");
    println!("  shopbot --cli     Interactive assistant chat");
    println!("  shopbot --help    Show this help message");
    println!("  shopbot --version Show version");
    println!();
    println!("Environment variables:");
    println!("  LLM_API_KEY               API key for the model (required)");
    println!("  LLM_MODEL                 Model name (default: gpt-4o-mini)");
    println!("  LLM_PROVIDER              Provider: openai or claude (default: openai)");
    println!("  LLM_BASE_URL              Custom API endpoint");
    println!("  GREEN_API_INSTANCE_ID     Messaging instance id");
    println!("  GREEN_API_INSTANCE_TOKEN  Messaging instance token");
    println!("  GREEN_API_WEBHOOK_TOKEN   Bearer secret for inbound webhooks");
    println!("  WEBHOOK_PORT              Webhook listen port (default: 3000)");
    println!("  WEBHOOK_PATH              Webhook route (default: /webhook)");
    println!("  MTN_MOMO_API_KEY          Payment API key");
    println!("  MTN_MOMO_USER_ID          Payment API user id");
    println!("  MTN_MOMO_PRIMARY_KEY      Payment subscription key");
    println!("  MTN_MOMO_ENVIRONMENT      sandbox or production (default: sandbox)");
}

/// Run the webhook server
async fn run_server(config: Config, assistant: Arc<ShopAssistant>) -> anyhow::Result<()> {
    let whatsapp = config
        .whatsapp
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("GREEN_API_INSTANCE_ID / GREEN_API_INSTANCE_TOKEN not set"))?;

    if config.webhook.secret_token.is_empty() {
        return Err(anyhow::anyhow!("GREEN_API_WEBHOOK_TOKEN not set"));
    }

    let gateway = GreenClient::new(&whatsapp.instance_id, &whatsapp.api_token)
        .map_err(|e| anyhow::anyhow!("Failed to create gateway client: {}", e))?;

    // Announce the instance state; an unreachable provider is not fatal at
    // startup, the webhook can still come up.
    match gateway.instance_status().await {
        Ok(state) => tracing::info!("Instance status: {}", state.state_instance),
        Err(e) => tracing::warn!("Could not fetch instance status: {}", e),
    }

    match &config.momo {
        Some(momo) => tracing::info!(
            "Payment credentials configured ({})",
            Environment::parse(&momo.environment).as_str()
        ),
        None => tracing::info!("Payment client not configured"),
    }

    let handler = Arc::new(ShopHandler::new(assistant, gateway));

    let addr: SocketAddr = ([0, 0, 0, 0], config.webhook.port).into();
    let server = WebhookServer::new(
        addr,
        config.webhook.path.clone(),
        config.webhook.secret_token.clone(),
        handler,
    );

    server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("Webhook server error: {}", e))
}
