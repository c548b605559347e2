use std::env;

use chrono::{FixedOffset, NaiveDate, NaiveTime, Utc};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub datastore_url: String,
    pub datastore_anon_key: String,
    /// Offset of the clinic's wall clock from UTC, in minutes. The live
    /// queue's notion of "today" follows the clinic clock, not UTC.
    pub clinic_utc_offset_minutes: i32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            datastore_url: env::var("DATASTORE_URL")
                .unwrap_or_else(|_| {
                    warn!("DATASTORE_URL not set, using empty value");
                    String::new()
                }),
            datastore_anon_key: env::var("DATASTORE_ANON_KEY")
                .unwrap_or_else(|_| {
                    warn!("DATASTORE_ANON_KEY not set, using empty value");
                    String::new()
                }),
            clinic_utc_offset_minutes: env::var("CLINIC_UTC_OFFSET_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(|| {
                    warn!("CLINIC_UTC_OFFSET_MINUTES not set, assuming UTC");
                    0
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.datastore_url.is_empty() && !self.datastore_anon_key.is_empty()
    }

    fn clinic_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.clinic_utc_offset_minutes * 60)
            .unwrap_or_else(|| {
                warn!(
                    "CLINIC_UTC_OFFSET_MINUTES={} out of range, falling back to UTC",
                    self.clinic_utc_offset_minutes
                );
                FixedOffset::east_opt(0).unwrap()
            })
    }

    /// Current date on the clinic's wall clock.
    pub fn clinic_today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.clinic_offset()).date_naive()
    }

    /// Current time of day on the clinic's wall clock.
    pub fn clinic_time_now(&self) -> NaiveTime {
        Utc::now().with_timezone(&self.clinic_offset()).time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clinic_clock_applies_configured_offset() {
        let config = AppConfig {
            datastore_url: "http://localhost:54321".to_string(),
            datastore_anon_key: "key".to_string(),
            clinic_utc_offset_minutes: 330,
        };

        let expected = (Utc::now() + chrono::Duration::minutes(330)).time();
        let actual = config.clinic_time_now();
        let drift = expected.signed_duration_since(actual).num_seconds().abs();
        // Allow for the gap between the two now() calls, and for the
        // wrap-around when the expected time crosses midnight.
        assert!(drift < 5 || drift > 86_395);
    }

    #[test]
    fn out_of_range_offset_falls_back_to_utc() {
        let config = AppConfig {
            datastore_url: String::new(),
            datastore_anon_key: String::new(),
            clinic_utc_offset_minutes: 100_000,
        };
        // Must not panic.
        let _ = config.clinic_today();
        assert!(!config.is_configured());
    }
}
