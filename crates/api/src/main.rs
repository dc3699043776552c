use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use linkdock_api::analyze::PageAnalyzer;
use linkdock_api::auth::google::HttpGoogleVerifier;
use linkdock_api::auth::password::hash_password;
use linkdock_api::config::ServerConfig;
use linkdock_api::router::build_app_router;
use linkdock_api::state::AppState;
use linkdock_api::summarize::{HttpSummarizer, NoopSummarizer, Summarizer};
use linkdock_checker::LinkProber;
use linkdock_db::repositories::AdminRepo;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "linkdock_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = linkdock_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    linkdock_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    linkdock_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Admin password bootstrap ---
    bootstrap_admin_password(&pool, &config).await;

    // --- Collaborators ---
    let prober = Arc::new(LinkProber::new().expect("Failed to build link prober"));
    let analyzer = Arc::new(PageAnalyzer::new().expect("Failed to build page analyzer"));

    let summarizer: Arc<dyn Summarizer> = match &config.summarizer_url {
        Some(url) => {
            tracing::info!(endpoint = %url, "AI summarizer enabled");
            Arc::new(HttpSummarizer::new(url.clone()).expect("Failed to build summarizer client"))
        }
        None => {
            tracing::info!("No SUMMARIZER_URL configured; metadata analysis uses raw extraction");
            Arc::new(NoopSummarizer)
        }
    };

    let google_verifier =
        Arc::new(HttpGoogleVerifier::new().expect("Failed to build Google verifier client"));

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        prober,
        analyzer,
        summarizer,
        google_verifier,
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

/// Seed the admin password hash from `ADMIN_PASSWORD` when none is stored.
///
/// An existing hash always wins; the env var only bootstraps a fresh
/// database, so rotating the password through the API survives restarts.
async fn bootstrap_admin_password(pool: &linkdock_db::DbPool, config: &ServerConfig) {
    let existing = AdminRepo::get_password_hash(pool)
        .await
        .expect("Failed to read admin password hash");
    if existing.is_some() {
        return;
    }

    match &config.admin_password {
        Some(password) => {
            let hash = hash_password(password).expect("Failed to hash admin password");
            AdminRepo::set_password_hash(pool, &hash)
                .await
                .expect("Failed to store admin password hash");
            tracing::info!("Admin password bootstrapped from ADMIN_PASSWORD");
        }
        None => {
            tracing::warn!("No admin password stored and ADMIN_PASSWORD unset; admin login disabled");
        }
    }
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
