//! `api` crate — HTTP REST API layer.
//!
//! Exposes (each path also answers with a trailing slash):
//!   GET    /healthz
//!   POST   /signup
//!   GET    /login      (Basic auth)
//!   GET    /me         (Basic auth)
//!   PUT    /me         (Basic auth)

pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info};

use db::DbPool;

pub use error::ApiError;
pub use handlers::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    use handlers::{health, users};

    // Layered on the method router so the 405 fallback gets the header too.
    let healthz = get(health::healthz).layer(SetResponseHeaderLayer::overriding(
        header::CACHE_CONTROL,
        HeaderValue::from_static(health::NO_CACHE),
    ));

    Router::new()
        .route("/healthz", healthz.clone())
        .route("/healthz/", healthz)
        .route("/signup", post(users::signup))
        .route("/signup/", post(users::signup))
        .route("/login", get(users::login))
        .route("/login/", get(users::login))
        .route("/me", get(users::me).put(users::update_me))
        .route("/me/", get(users::me).put(users::update_me))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `bind` and serve the API until Ctrl-C.
pub async fn serve(bind: &str, pool: DbPool) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind).await?;
    info!("API server listening on {}", listener.local_addr()?);

    axum::serve(listener, router(AppState::new(pool)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("Cannot listen for Ctrl-C, running until killed: {e}");
            std::future::pending::<()>().await;
        }
    }
}
