//! Scheduler data types
//!
//! Wire-compatible representations of the scheduler API's days,
//! appointments and interviewers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Appointment identifier
pub type AppointmentId = u32;

/// Interviewer identifier
pub type InterviewerId = u32;

/// Appointments keyed by id
pub type Appointments = BTreeMap<AppointmentId, Appointment>;

/// Interviewers keyed by id
pub type Interviewers = BTreeMap<InterviewerId, Interviewer>;

/// A student/interviewer pairing
///
/// Either side may be missing. A pairing with neither side is no pairing
/// at all, see [`Interview::into_pairing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interview {
    /// Student name
    #[serde(default)]
    pub student: Option<String>,
    /// Interviewer reference
    #[serde(default)]
    pub interviewer: Option<InterviewerId>,
}

impl Interview {
    pub fn new(student: impl Into<String>, interviewer: InterviewerId) -> Self {
        Self {
            student: Some(student.into()),
            interviewer: Some(interviewer),
        }
    }

    /// Pairing with only some of its sides known
    pub fn partial(student: Option<String>, interviewer: Option<InterviewerId>) -> Self {
        Self {
            student,
            interviewer,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.student.is_none() && self.interviewer.is_none()
    }

    /// `None` when neither side is set
    pub fn into_pairing(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

/// A single time slot on a day
///
/// `interview == None` is an empty slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AppointmentRecord")]
pub struct Appointment {
    pub id: AppointmentId,
    /// Time slot label (e.g. "12pm")
    pub time: String,
    pub interview: Option<Interview>,
}

impl Appointment {
    /// Create an empty appointment slot
    pub fn new(id: AppointmentId, time: impl Into<String>) -> Self {
        Self {
            id,
            time: time.into(),
            interview: None,
        }
    }

    /// Builder: book the slot
    pub fn booked(mut self, interview: Interview) -> Self {
        self.interview = Some(interview);
        self
    }

    pub fn is_booked(&self) -> bool {
        self.interview.is_some()
    }

    pub fn student(&self) -> Option<&str> {
        self.interview.as_ref().and_then(|i| i.student.as_deref())
    }

    pub fn interviewer(&self) -> Option<InterviewerId> {
        self.interview.as_ref().and_then(|i| i.interviewer)
    }

    /// Same slot with the interview replaced (`None` or an empty pairing cancels)
    pub fn with_interview(&self, interview: Option<Interview>) -> Self {
        Self {
            id: self.id,
            time: self.time.clone(),
            interview: interview.and_then(Interview::into_pairing),
        }
    }
}

/// Accepts both the nested `interview` object and the flat
/// `student`/`interviewer` pairing.
#[derive(Deserialize)]
struct AppointmentRecord {
    id: AppointmentId,
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    interview: Option<Interview>,
    #[serde(default)]
    student: Option<String>,
    #[serde(default)]
    interviewer: Option<InterviewerId>,
}

impl From<AppointmentRecord> for Appointment {
    fn from(record: AppointmentRecord) -> Self {
        let interview = record
            .interview
            .and_then(Interview::into_pairing)
            .or_else(|| Interview::partial(record.student, record.interviewer).into_pairing());

        Self {
            id: record.id,
            time: record.time.unwrap_or_default(),
            interview,
        }
    }
}

/// A scheduling day and the appointment slots it holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub appointments: Vec<AppointmentId>,
    #[serde(default)]
    pub interviewers: Vec<InterviewerId>,
    /// Number of empty slots remaining
    #[serde(default)]
    pub spots: u32,
}

impl Day {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            appointments: Vec::new(),
            interviewers: Vec::new(),
            spots: 0,
        }
    }

    /// Builder: set the appointment slots
    pub fn appointments(mut self, ids: impl IntoIterator<Item = AppointmentId>) -> Self {
        self.appointments = ids.into_iter().collect();
        self
    }

    /// Builder: set the interviewers available on this day
    pub fn interviewers(mut self, ids: impl IntoIterator<Item = InterviewerId>) -> Self {
        self.interviewers = ids.into_iter().collect();
        self
    }

    /// Builder: set the spot count
    pub fn spots(mut self, spots: u32) -> Self {
        self.spots = spots;
        self
    }

    pub fn contains(&self, id: AppointmentId) -> bool {
        self.appointments.contains(&id)
    }

    /// Count the empty slots of this day against an appointment map
    ///
    /// Ids missing from the map are not counted.
    pub fn count_spots(&self, appointments: &Appointments) -> u32 {
        self.appointments
            .iter()
            .filter_map(|id| appointments.get(id))
            .filter(|a| !a.is_booked())
            .count() as u32
    }
}

/// An interviewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interviewer {
    pub id: InterviewerId,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
}

impl Interviewer {
    pub fn new(id: InterviewerId, name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            avatar: avatar.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appointment_nested_form() {
        let json = r#"{"id": 2, "time": "1pm", "interview": {"student": "Archie Cohen", "interviewer": 2}}"#;
        let appointment: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appointment.id, 2);
        assert_eq!(appointment.time, "1pm");
        assert_eq!(appointment.student(), Some("Archie Cohen"));
        assert_eq!(appointment.interviewer(), Some(2));
    }

    #[test]
    fn test_appointment_flat_empty_slot() {
        let json = r#"{"id": 1, "interviewer": null, "student": null}"#;
        let appointment: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appointment.id, 1);
        assert_eq!(appointment.time, "");
        assert!(!appointment.is_booked());
    }

    #[test]
    fn test_appointment_flat_booked() {
        let json = r#"{"id": 3, "time": "2pm", "student": "Alice", "interviewer": 3}"#;
        let appointment: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appointment.interview, Some(Interview::new("Alice", 3)));
    }

    #[test]
    fn test_appointment_flat_partial_keeps_known_side() {
        let json = r#"{"id": 4, "time": "1pm", "student": "Carol", "interviewer": null}"#;
        let appointment: Appointment = serde_json::from_str(json).unwrap();
        assert!(appointment.is_booked());
        assert_eq!(appointment.student(), Some("Carol"));
        assert_eq!(appointment.interviewer(), None);

        let json = r#"{"id": 5, "time": "2pm", "interviewer": 2}"#;
        let appointment: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appointment.student(), None);
        assert_eq!(appointment.interviewer(), Some(2));
    }

    #[test]
    fn test_appointment_nested_empty_pairing_is_empty_slot() {
        let json = r#"{"id": 6, "time": "12pm", "interview": {"student": null, "interviewer": null}}"#;
        let appointment: Appointment = serde_json::from_str(json).unwrap();
        assert!(!appointment.is_booked());
    }

    #[test]
    fn test_appointment_serializes_nested() {
        let appointment = Appointment::new(1, "12pm").booked(Interview::new("Bob", 1));
        let json = serde_json::to_value(&appointment).unwrap();
        assert_eq!(json["interview"]["student"], "Bob");
        assert_eq!(json["interview"]["interviewer"], 1);
    }

    #[test]
    fn test_appointment_map_with_string_keys() {
        let json = r#"{"1": {"id": 1, "time": "12pm", "interview": null}}"#;
        let map: Appointments = serde_json::from_str(json).unwrap();
        assert!(map.contains_key(&1));
    }

    #[test]
    fn test_day_defaults() {
        let json = r#"{"name": "Monday", "appointments": [1, 2]}"#;
        let day: Day = serde_json::from_str(json).unwrap();
        assert_eq!(day.name, "Monday");
        assert_eq!(day.appointments, vec![1, 2]);
        assert_eq!(day.spots, 0);
        assert!(day.interviewers.is_empty());
    }

    #[test]
    fn test_count_spots() {
        let mut appointments = Appointments::new();
        appointments.insert(1, Appointment::new(1, "12pm"));
        appointments.insert(2, Appointment::new(2, "1pm").booked(Interview::new("Bob", 1)));

        let day = Day::new(1, "Monday").appointments([1, 2, 99]);
        assert_eq!(day.count_spots(&appointments), 1);
    }
}
