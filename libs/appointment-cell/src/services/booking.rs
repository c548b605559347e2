// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::DatastoreClient;

use crate::models::{
    Appointment, AppointmentError, AppointmentSearchQuery, AppointmentStatus, BookingSource,
    CreateAppointmentRequest,
};
use crate::services::lifecycle::AppointmentLifecycleService;

/// Orchestrates appointment reads and writes against the external
/// datastore. Every status mutation goes through the lifecycle service
/// first; the datastore arbitrates races between concurrent writers.
pub struct AppointmentBookingService {
    datastore: Arc<DatastoreClient>,
    lifecycle_service: AppointmentLifecycleService,
}

impl AppointmentBookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            datastore: Arc::new(DatastoreClient::new(config)),
            lifecycle_service: AppointmentLifecycleService::new(),
        }
    }

    /// Create an appointment. New appointments start in `Booked`; a
    /// booking collaborator may set `Confirmed` directly at creation,
    /// which is the only other permitted starting point.
    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
        token: &str,
    ) -> Result<Appointment, AppointmentError> {
        let initial_status = match request.status {
            None | Some(AppointmentStatus::Booked) => AppointmentStatus::Booked,
            Some(AppointmentStatus::Confirmed) => AppointmentStatus::Confirmed,
            Some(other) => {
                return Err(AppointmentError::ValidationError(format!(
                    "New appointments cannot start in status {}",
                    other
                )));
            }
        };

        let body = json!({
            "patient_ref": request.patient_ref,
            "doctor_ref": request.doctor_ref,
            "scheduled_date": request.scheduled_date,
            "scheduled_time": request.scheduled_time,
            "status": initial_status,
            "source": request.source.unwrap_or(BookingSource::Dashboard),
            "reason_for_visit": request.reason_for_visit,
        });

        let created: Vec<Appointment> = self
            .datastore
            .request(Method::POST, "/rest/v1/appointments", Some(token), Some(body))
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        let appointment = created.into_iter().next().ok_or_else(|| {
            AppointmentError::DatabaseError("Datastore returned no created row".to_string())
        })?;

        info!(
            "Appointment {} created for {} {} in status {}",
            appointment.id,
            appointment.scheduled_date,
            appointment.scheduled_time,
            appointment.status
        );

        Ok(appointment)
    }

    pub async fn get_appointment(
        &self,
        appointment_id: Uuid,
        token: &str,
    ) -> Result<Appointment, AppointmentError> {
        let path = format!("/rest/v1/appointments?id=eq.{}", appointment_id);

        let rows: Vec<Appointment> = self
            .datastore
            .request(Method::GET, &path, Some(token), None)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        rows.into_iter().next().ok_or(AppointmentError::NotFound)
    }

    pub async fn search_appointments(
        &self,
        query: AppointmentSearchQuery,
        token: &str,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let mut path = String::from(
            "/rest/v1/appointments?order=scheduled_date.asc,scheduled_time.asc,id.asc",
        );

        if let Some(date) = query.date {
            path.push_str(&format!("&scheduled_date=eq.{}", date));
        }
        if let Some(doctor_ref) = query.doctor_ref {
            path.push_str(&format!("&doctor_ref=eq.{}", doctor_ref));
        }
        if let Some(status) = query.status {
            path.push_str(&format!("&status=eq.{}", urlencoding::encode(status.as_str())));
        }
        if let Some(limit) = query.limit {
            path.push_str(&format!("&limit={}", limit));
        }
        if let Some(offset) = query.offset {
            path.push_str(&format!("&offset={}", offset));
        }

        debug!("Searching appointments: {}", path);

        self.datastore
            .request(Method::GET, &path, Some(token), None)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))
    }

    /// All appointments scheduled on one clinic day, slot order. Feeds the
    /// queue projection and the daily summary.
    pub async fn appointments_for_date(
        &self,
        date: NaiveDate,
        token: &str,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let path = format!(
            "/rest/v1/appointments?scheduled_date=eq.{}&order=scheduled_time.asc,id.asc",
            date
        );

        self.datastore
            .request(Method::GET, &path, Some(token), None)
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))
    }

    /// Request a status change for an appointment.
    ///
    /// The record is re-fetched here so the transition is validated
    /// against the stored status at the moment of mutation, never against
    /// a client-cached copy. Only a validated transition reaches the
    /// datastore.
    pub async fn change_status(
        &self,
        appointment_id: Uuid,
        requested: AppointmentStatus,
        token: &str,
    ) -> Result<Appointment, AppointmentError> {
        let current = self.get_appointment(appointment_id, token).await?;

        self.lifecycle_service
            .validate_status_transition(&current.status, &requested)?;

        let path = format!("/rest/v1/appointments?id=eq.{}", appointment_id);
        let body = json!({ "status": requested });

        let updated: Vec<Appointment> = self
            .datastore
            .request(Method::PATCH, &path, Some(token), Some(body))
            .await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        let appointment = updated.into_iter().next().ok_or(AppointmentError::NotFound)?;

        info!(
            "Appointment {} moved from {} to {}",
            appointment_id, current.status, appointment.status
        );

        Ok(appointment)
    }
}
