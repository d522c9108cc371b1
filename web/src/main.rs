use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use todo_web::{AppState, Config, UreqTransport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();
    let state = AppState::new(&config, Arc::new(UreqTransport::new()));
    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!(
        addr = %config.bind,
        api = %config.api_base_url,
        dev = config.dev,
        "todo-web listening"
    );

    todo_web::run(listener, state).await?;
    Ok(())
}
