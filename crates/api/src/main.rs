use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nomade_api::auth::password::hash_password;
use nomade_api::config::ServerConfig;
use nomade_api::router::build_app_router;
use nomade_api::state::AppState;
use nomade_core::roles::Role;
use nomade_db::models::user::CreateUser;
use nomade_db::repositories::UserRepo;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nomade_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = nomade_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    nomade_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    nomade_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Admin seed (registration only ever creates clients) ---
    seed_admin_user(&pool).await;

    // --- App state & router ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
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

/// Create the initial admin account from `ADMIN_EMAIL` / `ADMIN_PASSWORD`
/// env vars when no user with that email exists yet. A no-op when the vars
/// are unset.
async fn seed_admin_user(pool: &nomade_db::DbPool) {
    let Ok(email) = std::env::var("ADMIN_EMAIL") else {
        return;
    };
    let Ok(password) = std::env::var("ADMIN_PASSWORD") else {
        return;
    };
    let name = std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrador".into());

    let existing = UserRepo::find_by_email(pool, &email)
        .await
        .expect("Failed to look up admin user");
    if existing.is_some() {
        tracing::debug!(email = %email, "Admin user already present, skipping seed");
        return;
    }

    let password_hash = hash_password(&password).expect("Failed to hash admin password");
    let input = CreateUser {
        email: email.clone(),
        password_hash,
        name,
        role: Role::Admin,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("Failed to seed admin user");
    tracing::info!(email = %email, "Seeded admin user");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
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
