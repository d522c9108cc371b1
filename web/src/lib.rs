//! HTTP front end for the todo demo.
//!
//! # Overview
//! Four pages (landing, todo list, todo detail, form demo) and the form
//! demo's action, rendered server-side with askama. Every page's data comes
//! from a `todo_core::Loader`; submissions go through
//! `todo_core::FormAction`. The remote API is reached through a
//! `Transport`, ureq-backed in production and swappable in tests.

pub mod config;
pub mod error;
pub mod pages;
mod request_tracing;
pub mod state;
pub mod templates;
pub mod transport;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;

pub use config::Config;
pub use state::AppState;
pub use transport::UreqTransport;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/todo", get(pages::todo_list))
        .route("/todo/", get(pages::todo_detail_missing))
        .route("/todo/{todo_id}", get(pages::todo_detail))
        .route("/form", get(pages::form_page).post(pages::form_action))
        .fallback(pages::not_found)
        .layer(middleware::from_fn(
            request_tracing::request_tracing_middleware,
        ))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
