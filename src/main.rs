use std::sync::Arc;
use std::time::Duration;

use agentkit_guardrails::config;
use agentkit_guardrails::gate::GateClient;
use agentkit_guardrails::processor::Processor;
use agentkit_guardrails::rest::{router, AppState};
use agentkit_guardrails::rules::RuleSet;
use agentkit_guardrails::store::OverrideStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.yaml".into());
    let config = config::load_from_file(std::path::Path::new(&config_path))
        .expect("failed to load configuration");

    let gate = Arc::new(GateClient::new(
        &config.agentgate.url,
        config.agentgate.api_key.clone(),
        Duration::from_secs(config.agentgate.timeout_seconds),
    ));
    let rules = RuleSet::new(config.rules);
    let addr = format!("0.0.0.0:{}", config.server.port);
    tracing::info!(%addr, rules = rules.len(), gate = %config.agentgate.url, "guardrails server starting");

    let processor = Processor::new(rules, OverrideStore::new(), gate);
    let app = router(AppState { processor });

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind server address");
    axum::serve(listener, app).await.expect("server failed");
}
