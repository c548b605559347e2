// libs/appointment-cell/src/services/queue.rs
use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use crate::models::{Appointment, AppointmentStatus, QueueEntry};

/// Statuses that count as part of the live queue unless the caller
/// supplies its own set.
pub const DEFAULT_ACTIVE_STATUSES: [AppointmentStatus; 4] = [
    AppointmentStatus::Booked,
    AppointmentStatus::Confirmed,
    AppointmentStatus::CheckedIn,
    AppointmentStatus::InConsultation,
];

/// Statuses whose patients are still waiting to be seen, and so accrue
/// waiting time on the board.
pub const WAITING_STATUSES: [AppointmentStatus; 2] =
    [AppointmentStatus::Booked, AppointmentStatus::Confirmed];

/// Derives the ordered "current queue" view from a set of appointment
/// records. Holds no state of its own: clients poll on a fixed interval
/// and the projection is recomputed from scratch on every call, so the
/// same inputs always produce the same board.
pub struct QueueProjectionService;

impl QueueProjectionService {
    pub fn new() -> Self {
        Self
    }

    /// Project the live queue for one clinic day.
    ///
    /// Keeps appointments scheduled on `as_of_date` whose status is in
    /// `active_statuses`, ordered by slot time ascending with id as the
    /// tie-break. The input is never mutated.
    pub fn project(
        &self,
        appointments: &[Appointment],
        active_statuses: &[AppointmentStatus],
        as_of_date: NaiveDate,
        as_of_time: NaiveTime,
    ) -> Vec<QueueEntry> {
        let mut entries: Vec<QueueEntry> = appointments
            .iter()
            .filter(|apt| apt.scheduled_date == as_of_date)
            .filter(|apt| active_statuses.contains(&apt.status))
            .map(|apt| self.to_entry(apt, as_of_time))
            .collect();

        entries.sort_by(|a, b| {
            a.scheduled_time
                .cmp(&b.scheduled_time)
                .then(a.id.cmp(&b.id))
        });

        debug!(
            "Projected queue for {}: {} of {} appointments active",
            as_of_date,
            entries.len(),
            appointments.len()
        );

        entries
    }

    fn to_entry(&self, apt: &Appointment, as_of_time: NaiveTime) -> QueueEntry {
        QueueEntry {
            id: apt.id,
            patient_ref: apt.patient_ref,
            doctor_ref: apt.doctor_ref,
            scheduled_date: apt.scheduled_date,
            scheduled_time: apt.scheduled_time,
            status: apt.status,
            status_label: Self::status_label(&apt.status).to_string(),
            source: apt.source,
            waiting_minutes: Self::waiting_minutes(&apt.status, apt.scheduled_time, as_of_time),
        }
    }

    /// Label shown on the queue board for a status.
    pub fn status_label(status: &AppointmentStatus) -> &'static str {
        match status {
            AppointmentStatus::Booked => "Waiting",
            AppointmentStatus::CheckedIn => "Checked In",
            AppointmentStatus::InConsultation => "In Progress",
            other => other.as_str(),
        }
    }

    /// Whole minutes a patient has been waiting past their slot, clamped
    /// to zero while the slot is still in the future. Statuses past the
    /// waiting stage report no waiting time at all.
    pub fn waiting_minutes(
        status: &AppointmentStatus,
        scheduled_time: NaiveTime,
        as_of_time: NaiveTime,
    ) -> Option<i64> {
        if !WAITING_STATUSES.contains(status) {
            return None;
        }

        let waited = as_of_time.signed_duration_since(scheduled_time).num_minutes();
        Some(waited.max(0))
    }
}
