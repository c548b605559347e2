// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::TypedHeader;
use chrono::NaiveDate;
use headers::{authorization::Bearer, Authorization};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{
    AppointmentError, AppointmentSearchQuery, AppointmentStatus, CreateAppointmentRequest,
    StatusUpdateRequest,
};
use crate::services::booking::AppointmentBookingService;
use crate::services::queue::{QueueProjectionService, DEFAULT_ACTIVE_STATUSES};
use crate::services::stats::AppointmentStatsService;

// ==============================================================================
// QUERY PARAMETER STRUCTS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct AppointmentQueryParams {
    pub date: Option<NaiveDate>,
    pub doctor_ref: Option<Uuid>,
    pub status: Option<AppointmentStatus>,
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct QueueQueryParams {
    /// Defaults to today on the clinic clock.
    pub date: Option<NaiveDate>,
    /// Comma-separated status names overriding the default active set.
    pub statuses: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryQueryParams {
    pub date: Option<NaiveDate>,
}

// ==============================================================================
// APPOINTMENT HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();
    let booking_service = AppointmentBookingService::new(&state);

    let appointment = booking_service
        .create_appointment(request, token)
        .await
        .map_err(|e| match e {
            AppointmentError::ValidationError(msg) => AppError::BadRequest(msg),
            _ => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment booked successfully"
    })))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();
    let booking_service = AppointmentBookingService::new(&state);

    let appointment = booking_service
        .get_appointment(appointment_id, token)
        .await
        .map_err(|e| match e {
            AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
            _ => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn search_appointments(
    State(state): State<Arc<AppConfig>>,
    Query(params): Query<AppointmentQueryParams>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();
    let booking_service = AppointmentBookingService::new(&state);

    let search_query = AppointmentSearchQuery {
        date: params.date,
        doctor_ref: params.doctor_ref,
        status: params.status,
        limit: params.limit,
        offset: params.offset,
    };

    let appointments = booking_service
        .search_appointments(search_query, token)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len(),
        "limit": params.limit,
        "offset": params.offset
    })))
}

/// Request a status change. The booking service re-reads the record and
/// runs the transition through the lifecycle engine before anything is
/// persisted; an illegal pair comes back as a 400 naming both statuses.
#[axum::debug_handler]
pub async fn update_appointment_status(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<Uuid>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();
    let booking_service = AppointmentBookingService::new(&state);

    let appointment = booking_service
        .change_status(appointment_id, request.status, token)
        .await
        .map_err(|e| match e {
            AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
            AppointmentError::InvalidStatusTransition { .. } => AppError::BadRequest(e.to_string()),
            AppointmentError::UnknownStatus(_) => AppError::BadRequest(e.to_string()),
            _ => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Status updated"
    })))
}

// ==============================================================================
// QUEUE AND DASHBOARD HANDLERS
// ==============================================================================

/// The live queue for one clinic day. Clients poll this on a fixed
/// interval; there is no push transport and no server-held cursor.
#[axum::debug_handler]
pub async fn get_queue(
    State(state): State<Arc<AppConfig>>,
    Query(params): Query<QueueQueryParams>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();

    let active_statuses: Vec<AppointmentStatus> = match &params.statuses {
        Some(names) => names
            .split(',')
            .map(|name| name.trim().parse())
            .collect::<Result<_, _>>()
            .map_err(|e: AppointmentError| AppError::BadRequest(e.to_string()))?,
        None => DEFAULT_ACTIVE_STATUSES.to_vec(),
    };

    let as_of_date = params.date.unwrap_or_else(|| state.clinic_today());
    let as_of_time = state.clinic_time_now();

    let booking_service = AppointmentBookingService::new(&state);
    let appointments = booking_service
        .appointments_for_date(as_of_date, token)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let queue =
        QueueProjectionService::new().project(&appointments, &active_statuses, as_of_date, as_of_time);

    Ok(Json(json!({
        "success": true,
        "date": as_of_date,
        "queue": queue,
        "total": queue.len()
    })))
}

#[axum::debug_handler]
pub async fn get_daily_summary(
    State(state): State<Arc<AppConfig>>,
    Query(params): Query<SummaryQueryParams>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();
    let date = params.date.unwrap_or_else(|| state.clinic_today());

    let booking_service = AppointmentBookingService::new(&state);
    let appointments = booking_service
        .appointments_for_date(date, token)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let summary = AppointmentStatsService::new().daily_summary(&appointments, date);

    Ok(Json(json!({
        "success": true,
        "summary": summary
    })))
}
