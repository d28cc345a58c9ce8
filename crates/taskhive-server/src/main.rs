//! # Taskhive Server
//!
//! Main entry point: loads configuration, constructs the database and
//! cache backends, wires the services explicitly, and serves the REST
//! API until shutdown.

use std::sync::Arc;
use taskhive_config::ConfigLoader;
use taskhive_core::{TaskhiveError, TaskhiveResult};
use taskhive_repository::{create_pool, PgTaskRepository, PgUserRepository};
use taskhive_rest::{create_router, AppState};
use taskhive_security::{PasswordHasher, TokenProvider};
use taskhive_service::{
    AuthService, AuthServiceImpl, CacheStore, CacheTtls, RedisCacheStore, TaskService,
    TaskServiceImpl,
};
use tokio::signal;
use tracing::{error, info};

mod startup;

#[tokio::main]
async fn main() {
    init_logging();

    startup::print_banner();
    info!("Starting Taskhive server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> TaskhiveResult<()> {
    // Load configuration
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    info!("Environment: {}", config.app.environment);

    // Create database pool and apply migrations
    let db_pool = create_pool(&config.database).await?;
    db_pool.run_migrations().await?;

    // Construct the cache backend once and inject it; it is never
    // reached through global state.
    let cache: Arc<dyn CacheStore> = Arc::new(RedisCacheStore::from_config(&config.redis)?);

    // Repositories
    let task_repository = Arc::new(PgTaskRepository::new(Arc::clone(&db_pool)));
    let user_repository = Arc::new(PgUserRepository::new(Arc::clone(&db_pool)));

    // Security
    let security_config = Arc::new(config.security.clone());
    let password_hasher = Arc::new(PasswordHasher::with_cost(config.security.password_hash_cost));
    let token_provider = Arc::new(TokenProvider::new(security_config));

    // Services
    let task_service: Arc<dyn TaskService> = Arc::new(TaskServiceImpl::new(
        task_repository,
        Arc::clone(&cache),
        CacheTtls::from_config(&config.cache),
    ));
    let auth_service: Arc<dyn AuthService> = Arc::new(AuthServiceImpl::new(
        user_repository,
        password_hasher,
        Arc::clone(&token_provider),
    ));

    // REST router
    let app_state = AppState::new(task_service, auth_service);
    let router = create_router(app_state, token_provider, &config.server);

    let addr = config.server.addr();
    startup::print_startup_info(config.server.port);
    info!("Starting REST server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TaskhiveError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TaskhiveError::Internal(format!("Server error: {}", e)))?;

    db_pool.close().await;

    info!("Server shutdown complete");
    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,taskhive=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

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
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
