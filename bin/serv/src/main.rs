use axum::{Router, middleware, routing::get};
use forum_api::{ApiConfig, ApiState};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    forum_api::tracing::init_tracing(&config.env)?;

    let metrics_handle = forum_api::metrics::init_metrics()?;

    forum_db::ensure_database(&config.database_url).await?;
    let pool = forum_db::create_pool(&config.database_url, config.db_max_connections).await?;
    forum_db::migrate(&pool).await?;

    let state = ApiState::new(&config, pool);

    let cors = forum_api::middleware::cors::create_cors_layer(config.parsed_allowed_origins());

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Served by the same listener but outside the forum state
    let metrics_app = Router::new()
        .route("/metrics", get(forum_api::metrics::metrics_handler))
        .with_state(metrics_handle);

    let app = forum_api::router::router()
        .with_state(state)
        .merge(metrics_app)
        .layer(cors)
        .layer(trace_layer)
        .layer(middleware::from_fn(forum_api::metrics::track_metrics))
        .layer(middleware::from_fn(
            forum_api::middleware::request_id::request_id_middleware,
        ));

    let app = forum_api::middleware::security_headers::apply_security_headers(app, config.env.clone());

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(%address, environment = ?config.env, "Forum API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
