//! Statistic selectors over loaded scheduler data

use crate::model::Appointment;
use crate::store::DashboardState;

/// Interview slots scheduled across the days
///
/// Counts the appointments the days reference that are present in the
/// appointment map, booked or not. Bookings and cancellations leave it
/// unchanged.
pub fn total_interviews(state: &DashboardState) -> usize {
    day_appointments(state).count()
}

/// Time slot with the fewest bookings; ties go to the earliest appointment id
pub fn least_popular_time_slot(state: &DashboardState) -> Option<String> {
    let mut slots: Vec<(&str, usize)> = Vec::new();

    for appointment in state.appointments.values() {
        let booked = usize::from(appointment.is_booked());
        match slots.iter_mut().find(|(time, _)| *time == appointment.time) {
            Some((_, count)) => *count += booked,
            None => slots.push((appointment.time.as_str(), booked)),
        }
    }

    slots
        .into_iter()
        .fold(None, |least: Option<(&str, usize)>, slot| match least {
            Some(current) if current.1 <= slot.1 => Some(current),
            _ => Some(slot),
        })
        .map(|(time, _)| time.to_string())
}

/// Day with the fewest remaining spots; ties go to the earlier day
pub fn most_popular_day(state: &DashboardState) -> Option<String> {
    state
        .days
        .iter()
        .fold(None, |best: Option<&crate::model::Day>, day| match best {
            Some(current) if current.spots <= day.spots => Some(current),
            _ => Some(day),
        })
        .map(|day| day.name.clone())
}

/// Average interviews per day
pub fn interviews_per_day(state: &DashboardState) -> f64 {
    if state.days.is_empty() {
        return 0.0;
    }
    total_interviews(state) as f64 / state.days.len() as f64
}

fn day_appointments(state: &DashboardState) -> impl Iterator<Item = &Appointment> {
    state
        .days
        .iter()
        .flat_map(|day| day.appointments.iter())
        .filter_map(|id| state.appointments.get(id))
}
