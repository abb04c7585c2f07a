//! Application State
//!
//! Shared state of the scheduler API handlers.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use super::error::ApiResult;
use super::hub::{HubConfig, PushHub};
use super::schedule::Schedule;
use crate::live::PushMessage;
use crate::model::{Appointment, AppointmentId, Interview};

pub struct AppState {
    pub schedule: RwLock<Schedule>,
    pub hub: Arc<PushHub>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(schedule: Schedule) -> Self {
        Self::with_hub_config(schedule, HubConfig::default())
    }

    pub fn with_hub_config(schedule: Schedule, hub_config: HubConfig) -> Self {
        Self {
            schedule: RwLock::new(schedule),
            hub: Arc::new(PushHub::new(hub_config)),
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Book or cancel an appointment and announce it to push clients
    ///
    /// The announcement is published under the schedule lock, so clients
    /// receive updates in the order they were applied.
    pub async fn set_interview(
        &self,
        id: AppointmentId,
        interview: Option<Interview>,
    ) -> ApiResult<Appointment> {
        let mut schedule = self.schedule.write().await;
        let appointment = schedule.set_interview(id, interview)?.clone();

        let receivers = self.hub.publish(PushMessage::set_interview(
            id,
            appointment.interview.clone(),
        ));
        tracing::info!(
            appointment_id = id,
            booked = appointment.is_booked(),
            receivers,
            "Appointment updated"
        );

        Ok(appointment)
    }
}
