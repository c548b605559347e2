// libs/appointment-cell/src/services/stats.rs
use chrono::NaiveDate;

use crate::models::{Appointment, AppointmentStatus, DailySummary};

/// Rolls appointment records up into the per-status counts shown on the
/// dashboard cards. Pure, like the queue projection: one pass over the
/// input, nothing held between calls.
pub struct AppointmentStatsService;

impl AppointmentStatsService {
    pub fn new() -> Self {
        Self
    }

    pub fn daily_summary(&self, appointments: &[Appointment], date: NaiveDate) -> DailySummary {
        let mut summary = DailySummary {
            date,
            total: 0,
            booked: 0,
            confirmed: 0,
            checked_in: 0,
            in_consultation: 0,
            completed: 0,
            cancelled: 0,
            no_show: 0,
        };

        for apt in appointments.iter().filter(|apt| apt.scheduled_date == date) {
            summary.total += 1;
            match apt.status {
                AppointmentStatus::Booked => summary.booked += 1,
                AppointmentStatus::Confirmed => summary.confirmed += 1,
                AppointmentStatus::CheckedIn => summary.checked_in += 1,
                AppointmentStatus::InConsultation => summary.in_consultation += 1,
                AppointmentStatus::Completed => summary.completed += 1,
                AppointmentStatus::Cancelled => summary.cancelled += 1,
                AppointmentStatus::NoShow => summary.no_show += 1,
            }
        }

        summary
    }
}
