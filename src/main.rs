use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use job_search_proxy::app_state::AppState;
use job_search_proxy::config::AppConfig;
use job_search_proxy::routes;
use job_search_proxy::services::automation::AutomationClient;

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    // Load configuration from environment
    let config = AppConfig::from_env().expect("Failed to load configuration from environment");

    tracing::info!("Initializing job-search-proxy server");

    // Initialize Prometheus metrics recorder
    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    let prometheus_handle = Arc::new(prometheus_handle);
    routes::metrics::describe_metrics();

    tracing::info!(
        base_url = %config.automation_base_url,
        browser_profile = %config.browser_profile,
        proxy_country = %config.proxy_country_code,
        "Initializing automation client"
    );
    let automation = AutomationClient::new(
        &config.automation_api_key,
        &config.automation_base_url,
    )
    .expect("Failed to initialize automation client");

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config, automation);

    let app = routes::build_router(state, prometheus_handle)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(64 * 1024));

    tracing::info!("Starting job-search-proxy on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
