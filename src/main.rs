//! Wiring & DI. Entry point: bootstrap adapters, inject into use cases, run UI.
//! No business logic here.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tiktok_pilot::adapters::ai::{MockDecider, OpenAiDecider};
use tiktok_pilot::adapters::http::ReqwestTransport;
use tiktok_pilot::adapters::persistence::JsonlFeedArchive;
use tiktok_pilot::adapters::tiktok::{AuthContext, TikTokClient};
use tiktok_pilot::adapters::ui::tui::{TuiInputPort, prompt_secret};
use tiktok_pilot::ports::{DecisionPort, FeedArchivePort, HttpTransport, InputPort, TikTokApi};
use tiktok_pilot::shared::config::AppConfig;
use tiktok_pilot::usecases::prompts;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hyper=warn,reqwest=warn,rustls=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    tiktok_pilot::adapters::ui::init_ui();

    let mut cfg = AppConfig::load().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    // --- Session cookies: env first, masked prompt for whatever is missing ---
    for name in cfg.missing_credentials() {
        warn!(name, "credential not configured, prompting");
        let value = prompt_secret(&format!("{name}:")).map_err(|e| anyhow::anyhow!("{}", e))?;
        match name {
            "ms_token" => cfg.ms_token = Some(value),
            "session_id" => cfg.session_id = Some(value),
            _ => cfg.csrf_token = Some(value),
        }
    }
    let creds = cfg.credentials().map_err(|e| anyhow::anyhow!("{}", e))?;

    let bot_config = cfg.bot_config();
    bot_config.validate().map_err(|e| anyhow::anyhow!("{}", e))?;
    let collector_config = cfg.collector_config();
    collector_config
        .validate()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let data_dir = PathBuf::from(cfg.data_dir_or_default());
    let data_dir_abs = data_dir.canonicalize().unwrap_or_else(|_| data_dir.clone());
    info!(path = %data_dir_abs.display(), "data directory");

    // --- Transport + signed client ---
    let timeout_secs = cfg.request_timeout_secs_or_default();
    let transport: Arc<dyn HttpTransport> = Arc::new(
        ReqwestTransport::new(&cfg.base_url_or_default(), Duration::from_secs(timeout_secs))
            .map_err(|e| anyhow::anyhow!("{}", e))?,
    );
    info!(timeout_secs, base_url = %cfg.base_url_or_default(), "HTTP transport ready");
    let client = TikTokClient::new(
        transport,
        AuthContext {
            ms_token: creds.ms_token,
            session_id: creds.session_id,
            csrf_token: creds.csrf_token,
        },
        &cfg.user_agent_or_default(),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))?;
    let api: Arc<dyn TikTokApi> = Arc::new(client);

    let archive: Arc<dyn FeedArchivePort> = Arc::new(JsonlFeedArchive::new());

    // --- Decision agent (optional; probabilistic policy without one) ---
    let decider: Option<Arc<dyn DecisionPort>> = if cfg.is_ai_configured() {
        info!(
            model = %cfg.ai_model_or_default(),
            url = %cfg.ai_api_url_or_default(),
            "decision agent enabled with OpenAI adapter"
        );
        Some(Arc::new(OpenAiDecider::new(
            cfg.ai_api_url_or_default(),
            cfg.ai_api_key.clone().unwrap_or_default(),
            cfg.ai_model_or_default(),
            prompts::system_prompt(cfg.ai_persona.as_deref(), &bot_config),
        )))
    } else if cfg.is_ai_mock() {
        warn!("TIKTOK_AI_MOCK set, using mock decision agent");
        Some(Arc::new(MockDecider::new()))
    } else {
        info!("TIKTOK_AI_API_KEY not set, bot uses the probabilistic policy");
        None
    };

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        api,
        archive,
        decider,
        bot_config,
        collector_config,
        data_dir,
    ));

    // --- Run (main menu -> Engagement bot / Trending collector) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
