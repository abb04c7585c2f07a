//! Scheduler API routes
//!
//! - GET /api/days
//! - GET /api/appointments
//! - GET /api/interviewers
//! - PUT /api/appointments/:id
//! - DELETE /api/appointments/:id
//! - GET /health

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::error::ApiResult;
use super::state::AppState;
use crate::model::{AppointmentId, Appointments, Day, Interview, Interviewers};

/// Body of a booking request
#[derive(Debug, Deserialize, Serialize)]
pub struct BookingRequest {
    pub interview: Interview,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub connections: usize,
    pub uptime_seconds: u64,
    pub version: String,
}

pub async fn list_days(State(state): State<Arc<AppState>>) -> Json<Vec<Day>> {
    Json(state.schedule.read().await.days().to_vec())
}

pub async fn list_appointments(State(state): State<Arc<AppState>>) -> Json<Appointments> {
    Json(state.schedule.read().await.appointments().clone())
}

pub async fn list_interviewers(State(state): State<Arc<AppState>>) -> Json<Interviewers> {
    Json(state.schedule.read().await.interviewers().clone())
}

/// PUT /api/appointments/:id
pub async fn book_interview(
    State(state): State<Arc<AppState>>,
    Path(id): Path<AppointmentId>,
    Json(request): Json<BookingRequest>,
) -> ApiResult<StatusCode> {
    state.set_interview(id, Some(request.interview)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/appointments/:id
pub async fn cancel_interview(
    State(state): State<Arc<AppState>>,
    Path(id): Path<AppointmentId>,
) -> ApiResult<StatusCode> {
    state.set_interview(id, None).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        connections: state.hub.connection_count(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
