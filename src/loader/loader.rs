//! Initial Loader
//!
//! Fetches days, appointments and interviewers concurrently and merges them
//! into the store in a single mutation once all three have arrived.

use std::sync::Arc;

use super::client::SchedulerApi;
use super::error::LoadError;
use crate::model::{Appointments, Day, Interviewers};
use crate::store::{StatePatch, Store};

/// The three collections of a successful fetch
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedData {
    pub days: Vec<Day>,
    pub appointments: Appointments,
    pub interviewers: Interviewers,
}

impl LoadedData {
    /// Patch that installs the collections and clears `loading`
    pub fn into_patch(self) -> StatePatch {
        StatePatch::new()
            .loading(false)
            .days(self.days)
            .appointments(self.appointments)
            .interviewers(self.interviewers)
    }
}

/// One-shot fan-out fetch of the scheduler collections
pub struct InitialLoader {
    api: Arc<dyn SchedulerApi>,
}

impl InitialLoader {
    pub fn new(api: Arc<dyn SchedulerApi>) -> Self {
        Self { api }
    }

    /// Issue the three requests concurrently; fails if any one fails
    pub async fn fetch(&self) -> Result<LoadedData, LoadError> {
        let (days, appointments, interviewers) = tokio::try_join!(
            self.api.fetch_days(),
            self.api.fetch_appointments(),
            self.api.fetch_interviewers(),
        )?;

        Ok(LoadedData {
            days,
            appointments,
            interviewers,
        })
    }

    /// Fetch and merge into `store`
    ///
    /// On failure nothing is merged and `loading` stays true.
    pub async fn load(&self, store: &Store) -> Result<(), LoadError> {
        let start = std::time::Instant::now();

        match self.fetch().await {
            Ok(data) => {
                tracing::info!(
                    days = data.days.len(),
                    appointments = data.appointments.len(),
                    interviewers = data.interviewers.len(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Initial load complete"
                );
                store.set(data.into_patch());
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Initial load failed, dashboard stays loading");
                Err(e)
            }
        }
    }
}
