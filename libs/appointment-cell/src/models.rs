// libs/appointment-cell/src/models.rs
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: Uuid,
    /// Opaque key into the external patient registry. Never dereferenced
    /// for business rules.
    pub patient_ref: Uuid,
    /// Opaque key into the external doctor registry.
    pub doctor_ref: Uuid,
    /// The slot the appointment occupies. Immutable once booked;
    /// rescheduling is not an operation of this service.
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub status: AppointmentStatus,
    pub source: BookingSource,
    pub reason_for_visit: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle status of an appointment. The serialized names are the wire
/// vocabulary shared with the datastore and every client; anything else is
/// rejected at the parse boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AppointmentStatus {
    Booked,
    Confirmed,
    #[serde(rename = "Checked In")]
    CheckedIn,
    #[serde(rename = "In Consultation")]
    InConsultation,
    Completed,
    Cancelled,
    #[serde(rename = "No Show")]
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Booked => "Booked",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::CheckedIn => "Checked In",
            AppointmentStatus::InConsultation => "In Consultation",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::NoShow => "No Show",
        }
    }

    /// Terminal statuses admit no outgoing transition.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed
                | AppointmentStatus::Cancelled
                | AppointmentStatus::NoShow
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = AppointmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Booked" => Ok(AppointmentStatus::Booked),
            "Confirmed" => Ok(AppointmentStatus::Confirmed),
            "Checked In" => Ok(AppointmentStatus::CheckedIn),
            "In Consultation" => Ok(AppointmentStatus::InConsultation),
            "Completed" => Ok(AppointmentStatus::Completed),
            "Cancelled" => Ok(AppointmentStatus::Cancelled),
            "No Show" => Ok(AppointmentStatus::NoShow),
            other => Err(AppointmentError::UnknownStatus(other.to_string())),
        }
    }
}

/// Where a booking came from. Informational only; never affects
/// transition legality.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BookingSource {
    Dashboard,
    Phone,
    WhatsApp,
}

impl fmt::Display for BookingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingSource::Dashboard => write!(f, "Dashboard"),
            BookingSource::Phone => write!(f, "Phone"),
            BookingSource::WhatsApp => write!(f, "WhatsApp"),
        }
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub patient_ref: Uuid,
    pub doctor_ref: Uuid,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    /// Defaults to `Dashboard` for manual bookings.
    pub source: Option<BookingSource>,
    pub reason_for_visit: Option<String>,
    /// A booking collaborator may create an appointment directly in
    /// `Confirmed`; every other status must be reached through the engine.
    pub status: Option<AppointmentStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentSearchQuery {
    pub date: Option<NaiveDate>,
    pub doctor_ref: Option<Uuid>,
    pub status: Option<AppointmentStatus>,
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

/// One row of the live queue board, derived from an appointment record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueueEntry {
    pub id: Uuid,
    pub patient_ref: Uuid,
    pub doctor_ref: Uuid,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub status: AppointmentStatus,
    /// Board label ("Waiting", "In Progress", ...), not the raw status.
    pub status_label: String,
    pub source: BookingSource,
    /// Whole minutes the patient has been waiting past their slot. Absent
    /// for statuses that are no longer waiting to be seen.
    pub waiting_minutes: Option<i64>,
}

/// Per-status counts for one clinic day, feeding the dashboard cards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total: usize,
    pub booked: usize,
    pub confirmed: usize,
    pub checked_in: usize,
    pub in_consultation: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub no_show: usize,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Unknown appointment status: {0}")]
    UnknownStatus(String),

    #[error("Illegal status transition from {from} to {to}")]
    InvalidStatusTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_vocabulary_round_trips() {
        let statuses = [
            (AppointmentStatus::Booked, "\"Booked\""),
            (AppointmentStatus::Confirmed, "\"Confirmed\""),
            (AppointmentStatus::CheckedIn, "\"Checked In\""),
            (AppointmentStatus::InConsultation, "\"In Consultation\""),
            (AppointmentStatus::Completed, "\"Completed\""),
            (AppointmentStatus::Cancelled, "\"Cancelled\""),
            (AppointmentStatus::NoShow, "\"No Show\""),
        ];

        for (status, wire) in statuses {
            assert_eq!(serde_json::to_string(&status).unwrap(), wire);
            let back: AppointmentStatus = serde_json::from_str(wire).unwrap();
            assert_eq!(back, status);
            // Display and FromStr agree with serde.
            assert_eq!(status.to_string(), wire.trim_matches('"'));
            assert_eq!(wire.trim_matches('"').parse::<AppointmentStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected_not_coerced() {
        let parsed = "Rescheduled".parse::<AppointmentStatus>();
        assert_eq!(
            parsed,
            Err(AppointmentError::UnknownStatus("Rescheduled".to_string()))
        );

        let from_json: Result<AppointmentStatus, _> = serde_json::from_str("\"checked in\"");
        assert!(from_json.is_err());
    }

    #[test]
    fn transition_error_names_both_statuses() {
        let err = AppointmentError::InvalidStatusTransition {
            from: AppointmentStatus::CheckedIn,
            to: AppointmentStatus::Completed,
        };
        let message = err.to_string();
        assert!(message.contains("Checked In"));
        assert!(message.contains("Completed"));
    }
}
