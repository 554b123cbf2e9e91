use dotenvy::dotenv;

mod api {
    pub mod error;
    pub mod tags;
    pub mod health {
        pub mod routes;
    }
    pub mod recipe {
        pub mod dto;
        pub mod error_mapper;
        pub mod routes;
    }
}

mod config {
    pub mod app_config;
    pub mod cors_config;
    pub mod gemini_config;
    pub mod server_config;
}

mod setup {
    pub mod dependency_injection;
    pub mod server;
}

use config::{app_config::AppConfig, gemini_config::GeminiConfig};
use setup::{dependency_injection::DependencyContainer, server::Server};

/// REST API Entry Point
///
/// Initializes the application, wires dependencies, and starts the HTTP server.
///
/// Layout follows hexagonal architecture:
/// - config/: Application configuration (server, CORS, Gemini credential)
/// - setup/: Dependency injection and server setup
/// - api/: Route handlers and DTOs
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing with RUST_LOG env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // 2. Load environment variables
    dotenv().ok();

    // 3. Load configuration; a missing GEMINI_API_KEY refuses startup here,
    //    before any upstream call could be made
    let config = AppConfig::from_env();
    let gemini_config = GeminiConfig::from_env()?;

    // 4. Wire dependencies
    let container = DependencyContainer::new(gemini_config);

    // 5. Run server
    Server::run(config, container).await?;

    Ok(())
}
