//! Dashboard state and partial updates

use crate::model::{Appointment, Appointments, Day, Focus, Interviewers};

/// Client-local dashboard state
///
/// While `loading` is true the collections are not valid yet.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub loading: bool,
    pub focus: Focus,
    pub days: Vec<Day>,
    pub appointments: Appointments,
    pub interviewers: Interviewers,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            loading: true,
            focus: Focus::none(),
            days: Vec::new(),
            appointments: Appointments::new(),
            interviewers: Interviewers::new(),
        }
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the fetched collections may be read
    pub fn is_ready(&self) -> bool {
        !self.loading
    }
}

/// A partial update: every `Some` field replaces the state's field
///
/// `appointment` is a targeted upsert applied after a full `appointments`
/// replacement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatePatch {
    pub loading: Option<bool>,
    pub focus: Option<Focus>,
    pub days: Option<Vec<Day>>,
    pub appointments: Option<Appointments>,
    pub interviewers: Option<Interviewers>,
    pub appointment: Option<Appointment>,
}

impl StatePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = Some(loading);
        self
    }

    pub fn focus(mut self, focus: Focus) -> Self {
        self.focus = Some(focus);
        self
    }

    pub fn days(mut self, days: Vec<Day>) -> Self {
        self.days = Some(days);
        self
    }

    pub fn appointments(mut self, appointments: Appointments) -> Self {
        self.appointments = Some(appointments);
        self
    }

    pub fn interviewers(mut self, interviewers: Interviewers) -> Self {
        self.interviewers = Some(interviewers);
        self
    }

    /// Replace a single appointment entry
    pub fn appointment(mut self, appointment: Appointment) -> Self {
        self.appointment = Some(appointment);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether applying this patch would alter `state`
    pub fn changes(&self, state: &DashboardState) -> bool {
        let mut next = state.clone();
        self.clone().apply_to(&mut next);
        next != *state
    }

    /// Write every `Some` field into `state`
    pub fn apply_to(self, state: &mut DashboardState) {
        if let Some(loading) = self.loading {
            state.loading = loading;
        }
        if let Some(focus) = self.focus {
            state.focus = focus;
        }
        if let Some(days) = self.days {
            state.days = days;
        }
        if let Some(appointments) = self.appointments {
            state.appointments = appointments;
        }
        if let Some(interviewers) = self.interviewers {
            state.interviewers = interviewers;
        }
        if let Some(appointment) = self.appointment {
            state.appointments.insert(appointment.id, appointment);
        }
    }
}
