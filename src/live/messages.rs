//! Push Message Types
//!
//! Messages delivered by the scheduler's push channel, and the state change
//! each one produces.

use serde::{Deserialize, Serialize};

use crate::model::{AppointmentId, Interview};
use crate::store::{DashboardState, StatePatch};

/// Messages pushed from the scheduler to dashboards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PushMessage {
    /// An appointment was booked (`Some`) or cancelled (`None`)
    #[serde(rename = "SET_INTERVIEW")]
    SetInterview {
        id: AppointmentId,
        #[serde(default)]
        interview: Option<Interview>,
    },
}

impl PushMessage {
    pub fn set_interview(id: AppointmentId, interview: Option<Interview>) -> Self {
        PushMessage::SetInterview { id, interview }
    }

    /// Parse an inbound text frame
    ///
    /// Anything that is not a recognized message yields `None`.
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }

    /// Patch this message produces against `state`
    pub fn patch(&self, state: &DashboardState) -> StatePatch {
        match self {
            PushMessage::SetInterview { id, interview } => {
                set_interview_patch(state, *id, interview.clone())
            }
        }
    }
}

/// Book or cancel one appointment and refresh the spots of its day(s)
///
/// Unknown appointment ids produce an empty patch.
pub fn set_interview_patch(
    state: &DashboardState,
    id: AppointmentId,
    interview: Option<Interview>,
) -> StatePatch {
    let Some(existing) = state.appointments.get(&id) else {
        return StatePatch::new();
    };
    let updated = existing.with_interview(interview);

    let mut appointments = state.appointments.clone();
    appointments.insert(id, updated.clone());

    let mut days_changed = false;
    let days = state
        .days
        .iter()
        .map(|day| {
            if !day.contains(id) {
                return day.clone();
            }
            let spots = day.count_spots(&appointments);
            days_changed |= spots != day.spots;
            day.clone().spots(spots)
        })
        .collect();

    let patch = StatePatch::new().appointment(updated);
    if days_changed {
        patch.days(days)
    } else {
        patch
    }
}
