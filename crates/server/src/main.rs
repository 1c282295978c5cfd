//! CineCircle server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use cinecircle_api::{AppState, router as api_router};
use cinecircle_common::Config;
use cinecircle_core::{ActivityService, FriendshipService, IdentityService, WatchlistService};
use cinecircle_db::repositories::{
    ActivityRepository, FriendRequestRepository, UserRepository, WatchlistRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinecircle=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting cinecircle server...");

    // Load configuration
    let config = Config::load()?;

    if config.identity.webhook_secret.is_none() {
        tracing::warn!("No webhook secret configured, identity webhooks will be rejected");
    }

    // Connect to database
    let db = cinecircle_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    cinecircle_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let request_repo = FriendRequestRepository::new(Arc::clone(&db));
    let activity_repo = ActivityRepository::new(Arc::clone(&db));
    let watchlist_repo = WatchlistRepository::new(Arc::clone(&db));

    // Initialize services
    let friendship_service =
        FriendshipService::new(Arc::clone(&db), request_repo, user_repo.clone());
    let identity_service = IdentityService::new(user_repo.clone());
    let activity_service = ActivityService::new(activity_repo.clone(), user_repo);
    let watchlist_service = WatchlistService::new(watchlist_repo, activity_repo);

    let state = AppState {
        friendship_service,
        identity_service,
        activity_service,
        watchlist_service,
        webhook_secret: config.identity.webhook_secret.clone(),
        webhook_tolerance_secs: config.identity.webhook_tolerance_secs,
    };

    // Build router
    let app = Router::new()
        .merge(api_router())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
