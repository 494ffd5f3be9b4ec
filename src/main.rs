use portal_router::config::AppConfig;
use portal_router::{routes, state};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "no .env file loaded");
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let navigator = match config.build_navigator() {
        Ok(navigator) => navigator,
        Err(e) => {
            tracing::error!(error = %e, "route table setup failed");
            std::process::exit(1);
        }
    };
    tracing::info!(routes = navigator.table().len(), base_url = %config.base_url, "route table loaded");

    let shell = state::load_shell(&config.dist_dir).await;
    let state = state::AppState::new(navigator, &config, shell);

    let app = routes::app(state);
    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(port = config.port, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(port = config.port, "portal-router listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        std::process::exit(1);
    }
}
