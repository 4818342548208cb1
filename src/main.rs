// src/main.rs

use dotenvy::dotenv;
use schoollearn::{config::Config, routes, services::accounts::seed_defaults, state::AppState};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    tokio::fs::create_dir_all(&config.data_dir).await?;
    tracing::info!("Data directory: {}", config.data_dir.display());

    let state = AppState::new(config.clone());

    // Seed the default admin and the optional demo student
    if let Err(e) = seed_defaults(state.users.as_ref(), &config).await {
        tracing::error!("Failed to seed default accounts: {:?}", e);
    }
    if config.admin_view_only {
        tracing::warn!("Admin dashboard is in view-only mode");
    }

    // Create the Axum application router
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    // Start the server
    axum::serve(listener, app).await?;
    Ok(())
}
