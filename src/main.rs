//! Storefront agent binary: configuration, wiring, and the HTTP server.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use storefront_agent::adapters::http::{agent_routes, AgentAppState};
use storefront_agent::adapters::{
    GeminiConfig, GeminiProvider, JsonRpcToolGateway, PineconeConfig, PineconeIndex,
    UnconfiguredModel,
};
use storefront_agent::application::handlers::{
    ClassifyIntentHandler, CreateOrderHandler, InfoSearchHandler, OrderStatusHandler,
    ProcessMessageHandler, ProductSearchHandler,
};
use storefront_agent::application::LlmGateway;
use storefront_agent::config::AppConfig;
use storefront_agent::ports::{KnowledgeIndex, LanguageModel, ToolGateway};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let orchestrator = build_orchestrator(&config);
    let state = AgentAppState::new(Arc::new(orchestrator));

    let app = build_router(&config, state);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, environment = ?config.server.environment, "starting storefront agent");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Wires ports to adapters from configuration and assembles the workflow.
fn build_orchestrator(config: &AppConfig) -> ProcessMessageHandler {
    let model: Arc<dyn LanguageModel> = match &config.ai.gemini_api_key {
        Some(key) if !key.is_empty() => Arc::new(GeminiProvider::new(
            GeminiConfig::new(key.clone())
                .with_model(&config.ai.model)
                .with_base_url(&config.ai.base_url)
                .with_timeout(config.ai.timeout()),
        )),
        _ => {
            tracing::warn!("no completion credential configured, LLM stages will degrade");
            Arc::new(UnconfiguredModel)
        }
    };
    let llm = LlmGateway::new(model);

    let tools: Arc<dyn ToolGateway> = Arc::new(JsonRpcToolGateway::new(config.tools.timeout()));

    let index = build_knowledge_index(config);
    if index.is_none() {
        tracing::warn!("knowledge index not configured, info queries will use static fallback");
    }

    ProcessMessageHandler::new(
        ClassifyIntentHandler::new(llm.clone()),
        ProductSearchHandler::new(llm.clone(), tools.clone(), &config.tools.catalog_endpoint),
        CreateOrderHandler::new(llm.clone(), tools.clone(), &config.tools.orders_endpoint),
        OrderStatusHandler::new(llm.clone(), tools, &config.tools.orders_endpoint),
        InfoSearchHandler::new(llm, index, config.knowledge.top_k, &config.knowledge.brand),
    )
}

/// Retrieval needs the index credential/host pair plus the embedding key;
/// anything missing leaves the handler on its static fallback.
fn build_knowledge_index(config: &AppConfig) -> Option<Arc<dyn KnowledgeIndex>> {
    if !config.knowledge.has_index() || !config.ai.has_credentials() {
        return None;
    }

    let index_api_key = config.knowledge.index_api_key.clone()?;
    let index_host = config.knowledge.index_host.clone()?;
    let embedding_api_key = config.ai.gemini_api_key.clone()?;

    let pinecone = PineconeConfig::new(index_api_key, index_host, embedding_api_key)
        .with_embedding_model(&config.knowledge.embedding_model)
        .with_embedding_base_url(&config.ai.base_url);

    Some(Arc::new(PineconeIndex::new(pinecone)))
}

fn build_router(config: &AppConfig, state: AgentAppState) -> Router {
    let cors = {
        let origins = config.server.cors_origins_list();
        if origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let parsed: Vec<http::HeaderValue> =
                origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(parsed))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    agent_routes()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors)
        .with_state(state)
}
