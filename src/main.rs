use api_badges::config::{AppConfig, EngineConfig};
use api_badges::metrics::history::SyntheticHistory;
use api_badges::service::badge_service::BadgeService;
use api_badges::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();
    let engine = EngineConfig::from_app(&cfg);
    let unknown = engine.warn_on_unknown_criteria();
    tracing::info!(
        badges = engine.catalog.len(),
        threshold = engine.confidence_threshold,
        history_depth = engine.history_depth,
        unknown_criteria = unknown,
        "badge catalog loaded"
    );

    let state = AppState {
        badge_service: BadgeService::new(engine, Arc::new(SyntheticHistory)),
    };

    let app = Router::new()
        .route("/", get(api_badges::http::handlers::ops::root))
        .route("/health", get(api_badges::http::handlers::ops::health))
        .route("/ops/readiness", get(api_badges::http::handlers::ops::readiness))
        .route("/ops/liveness", get(api_badges::http::handlers::ops::liveness))
        .route(
            "/calculate-badges",
            post(api_badges::http::handlers::badges::calculate_badges),
        )
        .route(
            "/bulk-calculate",
            post(api_badges::http::handlers::badges::bulk_calculate),
        )
        .route("/test-api", post(api_badges::http::handlers::badges::test_api))
        .route("/badge-rules", get(api_badges::http::handlers::rules::badge_rules))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
