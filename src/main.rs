use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use jupiter_theater::adapters::ai::{OpenRouterConfig, OpenRouterProvider};
use jupiter_theater::adapters::tcp::TheaterServer;
use jupiter_theater::application::{
    IntentClassifier, ModelGateway, PromptRegistry, SlotExtractor,
};
use jupiter_theater::config::AppConfig;
use jupiter_theater::ports::AIProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    config.validate()?;

    let api_key = config
        .ai
        .openrouter_api_key
        .clone()
        .ok_or("OPENROUTER_API_KEY is required")?;

    let primary: Arc<dyn AIProvider> = Arc::new(OpenRouterProvider::new(
        OpenRouterConfig::new(api_key.clone(), config.ai.primary_model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout()),
    )?);
    let fallback: Arc<dyn AIProvider> = Arc::new(OpenRouterProvider::new(
        OpenRouterConfig::new(api_key, config.ai.fallback_model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout()),
    )?);

    let gateway = Arc::new(ModelGateway::new(primary, fallback));
    let registry = Arc::new(match config.prompts.dir {
        Some(ref dir) => PromptRegistry::from_dir(dir)?,
        None => PromptRegistry::builtin(),
    });

    let classifier = Arc::new(IntentClassifier::new(Arc::clone(&gateway)));
    let extractor = Arc::new(SlotExtractor::new(gateway, registry));

    let addr = config.server.socket_addr()?;
    let server = TheaterServer::bind(addr, classifier, extractor).await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(());
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for shutdown signal");
            return;
        }
        let _ = shutdown_tx.send(());
    });

    server.serve(shutdown_rx).await;
    tracing::info!("server stopped");

    Ok(())
}
