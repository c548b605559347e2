use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use serde_json::json;
use uuid::Uuid;

use shared_config::AppConfig;

pub struct TestConfig {
    pub datastore_url: String,
    pub datastore_anon_key: String,
    pub clinic_utc_offset_minutes: i32,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            datastore_url: "http://localhost:54321".to_string(),
            datastore_anon_key: "test-anon-key".to_string(),
            clinic_utc_offset_minutes: 0,
        }
    }
}

impl TestConfig {
    /// Point the datastore client at a mock server.
    pub fn with_datastore_url(url: &str) -> Self {
        Self {
            datastore_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            datastore_url: self.datastore_url.clone(),
            datastore_anon_key: self.datastore_anon_key.clone(),
            clinic_utc_offset_minutes: self.clinic_utc_offset_minutes,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// Canned response bodies in the datastore's row format.
pub struct MockDatastoreResponses;

impl MockDatastoreResponses {
    pub fn appointment_row(
        id: Uuid,
        patient_ref: Uuid,
        doctor_ref: Uuid,
        scheduled_date: NaiveDate,
        scheduled_time: NaiveTime,
        status: &str,
    ) -> serde_json::Value {
        json!({
            "id": id,
            "patient_ref": patient_ref,
            "doctor_ref": doctor_ref,
            "scheduled_date": scheduled_date,
            "scheduled_time": scheduled_time,
            "status": status,
            "source": "Dashboard",
            "reason_for_visit": "Routine check-up",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })
    }

    pub fn error_response(message: &str, code: &str) -> serde_json::Value {
        json!({
            "error": {
                "message": message,
                "code": code
            }
        })
    }
}
