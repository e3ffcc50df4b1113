//! Pharmacy console API server.
//!
//! Wires configuration, logging, the user store, and the HTTP router, then
//! serves until Ctrl+C or SIGTERM.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use pharmacy_api::{AppState, build_router};
use pharmacy_auth::AccountService;
use pharmacy_auth::accounts::NewAccount;
use pharmacy_core::config::AppConfig;
use pharmacy_core::error::AppError;
use pharmacy_database::{UserStore, open_user_store};
use pharmacy_entity::user::{UserProfile, UserRole};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let dir = std::env::var("PHARMACY_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("PHARMACY_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load_from(&dir, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting pharmacy console API v{}", env!("CARGO_PKG_VERSION"));

    if config.auth.jwt_secret == AppConfig::default().auth.jwt_secret {
        tracing::warn!("auth.jwt_secret is the built-in default; set PHARMACY__AUTH__JWT_SECRET");
    }

    tracing::info!(provider = ?config.database.provider, "Opening user store...");
    let users = open_user_store(&config.database).await?;

    bootstrap_admin(&config, Arc::clone(&users)).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let app = build_router(AppState::new(config, users));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Pharmacy console API listening on {}", addr);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });
    let mut server = tokio::spawn(async move { server.await });

    // In-flight requests get the grace period, then the process exits anyway.
    tokio::select! {
        joined = &mut server => {
            joined
                .map_err(|e| AppError::internal(format!("Server task failed: {e}")))?
                .map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = async {
            let _ = shutdown_rx.wait_for(|stopping| *stopping).await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(grace_seconds = grace.as_secs(), "Grace period elapsed; dropping open connections");
        }
    }

    tracing::info!("Pharmacy console API shut down gracefully");
    Ok(())
}

/// Create the configured first admin if its email is not taken
async fn bootstrap_admin(config: &AppConfig, users: Arc<dyn UserStore>) -> Result<(), AppError> {
    let Some(admin) = &config.auth.bootstrap_admin else {
        return Ok(());
    };

    if users.find_by_email(&admin.email).await?.is_some() {
        return Ok(());
    }

    let operator = UserProfile::new("bootstrap", UserRole::Admin, Vec::<String>::new());
    let user = AccountService::new(users, &config.auth)
        .create(
            &operator,
            NewAccount {
                name: admin.name.clone(),
                email: admin.email.clone(),
                password: admin.password.clone(),
                role: UserRole::Admin,
                permissions: None,
            },
        )
        .await?;

    tracing::info!(user_id = %user.id, email = %user.email, "Bootstrap admin created");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
