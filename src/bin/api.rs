//! Scheduler API Server
//!
//! Run with: cargo run --bin scheduler-api
//!
//! Serves a seeded week of appointments and pushes `SET_INTERVIEW` to
//! WebSocket clients connected at `/` whenever a booking changes.
//!
//! # Configuration
//!
//! Read from the dashboard config file (`[server]`, `[logging]`), with
//! environment overrides:
//! - `INTERVIEW_DASHBOARD_SERVER_HOST`: Host to bind to (default: 0.0.0.0)
//! - `INTERVIEW_DASHBOARD_SERVER_PORT`: Port to listen on (default: 8001)
//! - `RUST_LOG`: Log filter (default: interview_dashboard=info)

use interview_dashboard::config::Config;
use interview_dashboard::server::{serve, shutdown_signal, AppState, Schedule};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    config.logging.init()?;

    tracing::info!("Starting scheduler API v{}", env!("CARGO_PKG_VERSION"));

    let schedule = Schedule::seed();
    tracing::info!(
        days = schedule.days().len(),
        appointments = schedule.appointments().len(),
        interviewers = schedule.interviewers().len(),
        "Seeded schedule"
    );

    serve(AppState::new(schedule), &config.server.addr(), shutdown_signal()).await?;

    tracing::info!("Scheduler API stopped");
    Ok(())
}
