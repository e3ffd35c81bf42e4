use std::net::SocketAddr;
use std::sync::Arc;

use neuronav_ai::{AiConfig, OpenRouterAuthor};
use neuronav_core::assessment::default_questions;
use neuronav_core::config::NavigatorConfig;
use neuronav_core::generation::RoadmapAuthor;
use neuronav_core::store::memory::MemoryStore;
use neuronav_db::store::PgStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use neuronav_api::config::ServerConfig;
use neuronav_api::router::build_app_router;
use neuronav_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "neuronav_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let navigator = match &config.navigator_config {
        Some(path) => NavigatorConfig::load(path)
            .unwrap_or_else(|e| panic!("Invalid navigator config {}: {e}", path.display())),
        None => NavigatorConfig::default(),
    };

    // --- AI author ---
    let author: Option<Arc<dyn RoadmapAuthor>> = match AiConfig::from_env() {
        Some(ai_config) => {
            let author = OpenRouterAuthor::new(ai_config).expect("Failed to build AI client");
            tracing::info!(model = author.model(), "AI roadmap authoring enabled");
            Some(Arc::new(author) as Arc<dyn RoadmapAuthor>)
        }
        None => {
            tracing::warn!("OPENROUTER_API_KEY not set, AI roadmap authoring disabled");
            None
        }
    };

    // --- Storage ---
    let state = match &config.database_url {
        Some(database_url) => {
            let pool = neuronav_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            neuronav_db::health_check(&pool)
                .await
                .expect("Database health check failed");

            neuronav_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            neuronav_db::seed::seed_resources_if_empty(&pool)
                .await
                .expect("Failed to seed resource catalog");
            neuronav_db::seed::seed_questions_if_empty(&pool)
                .await
                .expect("Failed to seed quiz questions");

            let store = Arc::new(PgStore::new(pool.clone()));
            AppState::new(config.clone(), navigator, store, author, Some(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            let store = Arc::new(
                MemoryStore::with_resources(neuronav_db::seed::default_resources())
                    .with_questions(default_questions()),
            );
            AppState::new(config.clone(), navigator, store, author, None)
        }
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
