//! Scheduler API server
//!
//! A development backend for the dashboard, built with Axum: serves the
//! scheduler's days, appointments and interviewers, accepts bookings and
//! cancellations, and announces each change on the push channel.
//!
//! # Endpoints
//!
//! - `GET /api/days`
//! - `GET /api/appointments`
//! - `GET /api/interviewers`
//! - `PUT /api/appointments/:id` - Book (`{"interview": {"student", "interviewer"}}`)
//! - `DELETE /api/appointments/:id` - Cancel
//! - `GET /health`
//! - `GET /` - WebSocket push channel (`SET_INTERVIEW` messages)

mod error;
mod handler;
mod hub;
mod routes;
mod schedule;
mod state;

pub use error::{ApiError, ApiResult};
pub use hub::{HubConfig, HubConnection, HubError, PushHub};
pub use routes::{BookingRequest, HealthResponse};
pub use schedule::Schedule;
pub use state::AppState;

use axum::{routing::get, Router};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use handler::websocket_handler;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/days", get(routes::list_days))
        .route("/appointments", get(routes::list_appointments))
        .route(
            "/appointments/:id",
            axum::routing::put(routes::book_interview).delete(routes::cancel_interview),
        )
        .route("/interviewers", get(routes::list_interviewers));

    Router::new()
        .route("/", get(websocket_handler))
        .route("/health", get(routes::health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Bind `addr` and serve until `shutdown` resolves
pub async fn serve(
    state: AppState,
    addr: &str,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ApiError> {
    let listener = TcpListener::bind(addr).await?;
    serve_on(listener, state, shutdown).await
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn serve_on(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ApiError> {
    let router = build_router(state);
    tracing::info!(addr = ?listener.local_addr().ok(), "Scheduler API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Scheduler API shut down gracefully");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
