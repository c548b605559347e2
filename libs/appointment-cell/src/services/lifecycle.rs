// libs/appointment-cell/src/services/lifecycle.rs
use tracing::{debug, warn};

use crate::models::{AppointmentError, AppointmentStatus};

/// Owns the appointment status transition graph. Stateless: every decision
/// is a lookup against the static table in `valid_transitions`, so
/// identical inputs always produce identical answers. The storage layer
/// must consult this before committing any status mutation - there is no
/// other legal path to changing a status.
pub struct AppointmentLifecycleService;

impl AppointmentLifecycleService {
    pub fn new() -> Self {
        Self
    }

    /// Validate that a status transition is allowed.
    ///
    /// The caller is responsible for passing the status of a freshly read
    /// record, not a client-cached copy; validation against stale state is
    /// re-run by the caller after a re-fetch.
    pub fn validate_status_transition(
        &self,
        current_status: &AppointmentStatus,
        new_status: &AppointmentStatus,
    ) -> Result<(), AppointmentError> {
        debug!("Validating status transition from {} to {}", current_status, new_status);

        if !self.valid_transitions(current_status).contains(new_status) {
            warn!("Invalid status transition attempted: {} -> {}", current_status, new_status);
            return Err(AppointmentError::InvalidStatusTransition {
                from: *current_status,
                to: *new_status,
            });
        }

        Ok(())
    }

    /// All valid next statuses for a given current status. The entire
    /// transition graph lives in this one table; a status never lists
    /// itself, so no-op "transitions" are rejected along with everything
    /// else not in the allowed set.
    pub fn valid_transitions(
        &self,
        current_status: &AppointmentStatus,
    ) -> &'static [AppointmentStatus] {
        match current_status {
            AppointmentStatus::Booked => &[
                AppointmentStatus::CheckedIn,
                AppointmentStatus::Cancelled,
                AppointmentStatus::NoShow,
            ],
            // Confirmed is only ever set by a booking collaborator at
            // creation time; no transition reaches it. Out of it, the
            // allowed set matches Booked.
            AppointmentStatus::Confirmed => &[
                AppointmentStatus::CheckedIn,
                AppointmentStatus::Cancelled,
                AppointmentStatus::NoShow,
            ],
            AppointmentStatus::CheckedIn => &[
                AppointmentStatus::InConsultation,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::InConsultation => &[AppointmentStatus::Completed],
            // Terminal states - no transitions allowed
            AppointmentStatus::Completed
            | AppointmentStatus::Cancelled
            | AppointmentStatus::NoShow => &[],
        }
    }
}
