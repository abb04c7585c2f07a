//! Data Model
//!
//! Scheduler collections (days, appointments, interviewers) as served by the
//! scheduler API, and the panel focus selection owned by the dashboard.

mod focus;
mod types;

pub use focus::{Focus, PanelId};
pub use types::{
    Appointment, AppointmentId, Appointments, Day, Interview, Interviewer, InterviewerId,
    Interviewers,
};
