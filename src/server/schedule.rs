//! In-memory scheduler data
//!
//! Holds the days, appointments and interviewers served by the API and
//! applies bookings and cancellations, keeping each day's spot count in
//! step with its appointments.

use crate::model::{
    Appointment, AppointmentId, Appointments, Day, Interview, Interviewer, Interviewers,
};

use super::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Default)]
pub struct Schedule {
    days: Vec<Day>,
    appointments: Appointments,
    interviewers: Interviewers,
}

impl Schedule {
    /// Build a schedule; spot counts are recomputed from the appointments
    pub fn new(days: Vec<Day>, appointments: Appointments, interviewers: Interviewers) -> Self {
        let mut schedule = Self {
            days,
            appointments,
            interviewers,
        };
        for day in &mut schedule.days {
            day.spots = day.count_spots(&schedule.appointments);
        }
        schedule
    }

    /// A week of five days with three slots each
    pub fn seed() -> Self {
        const NAMES: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];
        const TIMES: [&str; 3] = ["12pm", "1pm", "2pm"];
        const BOOKINGS: [(AppointmentId, &str, u32); 4] = [
            (2, "Archie Cohen", 1),
            (4, "Chad Takahashi", 2),
            (5, "Jamal Jordan", 4),
            (10, "Leopold Silvers", 5),
        ];

        let interviewers: Interviewers = [
            (1, "Sylvia Palmer", "https://i.imgur.com/LpaY82x.png"),
            (2, "Tori Malcolm", "https://i.imgur.com/Nmx0Qxo.png"),
            (3, "Mildred Nazir", "https://i.imgur.com/T2WwVfS.png"),
            (4, "Cohana Roy", "https://i.imgur.com/FK8V841.jpg"),
            (5, "Sven Jones", "https://i.imgur.com/twYrpay.jpg"),
        ]
        .into_iter()
        .map(|(id, name, avatar)| (id, Interviewer::new(id, name, avatar)))
        .collect();

        let mut appointments = Appointments::new();
        let mut days = Vec::with_capacity(NAMES.len());
        let mut next_id: AppointmentId = 1;

        for (index, name) in NAMES.iter().enumerate() {
            let mut ids = Vec::with_capacity(TIMES.len());
            for time in TIMES {
                appointments.insert(next_id, Appointment::new(next_id, time));
                ids.push(next_id);
                next_id += 1;
            }

            // Three interviewers per day, rotating through the roster
            let offered = (0..3).map(|k| ((index + k) % interviewers.len()) as u32 + 1);
            days.push(Day::new(index as u32 + 1, *name).appointments(ids).interviewers(offered));
        }

        for (id, student, interviewer) in BOOKINGS {
            if let Some(appointment) = appointments.get_mut(&id) {
                appointment.interview = Some(Interview::new(student, interviewer));
            }
        }

        Self::new(days, appointments, interviewers)
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn appointments(&self) -> &Appointments {
        &self.appointments
    }

    pub fn interviewers(&self) -> &Interviewers {
        &self.interviewers
    }

    /// Book (`Some`) or cancel (`None`) an appointment
    ///
    /// A booking must name a student and an interviewer offered on the day
    /// holding the appointment.
    pub fn set_interview(
        &mut self,
        id: AppointmentId,
        interview: Option<Interview>,
    ) -> ApiResult<&Appointment> {
        if !self.appointments.contains_key(&id) {
            return Err(ApiError::AppointmentNotFound(id));
        }

        if let Some(interview) = &interview {
            self.validate(id, interview)?;
        }

        if let Some(appointment) = self.appointments.get_mut(&id) {
            appointment.interview = interview;
        }

        for day in self.days.iter_mut().filter(|d| d.contains(id)) {
            day.spots = day.count_spots(&self.appointments);
        }

        self.appointments
            .get(&id)
            .ok_or(ApiError::AppointmentNotFound(id))
    }

    fn validate(&self, id: AppointmentId, interview: &Interview) -> ApiResult<()> {
        let has_student = interview
            .student
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty());
        if !has_student {
            return Err(ApiError::Validation("student name is required".to_string()));
        }

        let Some(interviewer) = interview.interviewer else {
            return Err(ApiError::Validation("interviewer is required".to_string()));
        };

        if !self.interviewers.contains_key(&interviewer) {
            return Err(ApiError::Validation(format!(
                "unknown interviewer {}",
                interviewer
            )));
        }

        let offered = self
            .days
            .iter()
            .filter(|d| d.contains(id))
            .all(|d| d.interviewers.contains(&interviewer));
        if !offered {
            return Err(ApiError::Validation(format!(
                "interviewer {} is not available for appointment {}",
                interviewer, id
            )));
        }

        Ok(())
    }
}
