use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Wire format used by the marketplace for submission timestamps.
pub const SUBMIT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A single survey request: one worker admitted to one group.
///
/// The database assigns the row id on insert; this type carries only
/// the caller-provided columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyRequest {
    pub worker_id: String,
    pub url: Option<String>,
    pub group_name: String,
    pub time: Option<DateTime<Utc>>,
}

impl SurveyRequest {
    pub fn new(worker_id: impl Into<String>, group_name: impl Into<String>) -> Self {
        Self {
            worker_id: worker_id.into(),
            url: None,
            group_name: group_name.into(),
            time: None,
        }
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    pub fn with_time(mut self, time: Option<DateTime<Utc>>) -> Self {
        self.time = time;
        self
    }
}

/// Parse a marketplace submission timestamp (`YYYY-MM-DDTHH:MM:SSZ`).
pub fn parse_submit_time(raw: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(raw, SUBMIT_TIME_FORMAT)?;
    Ok(naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_request_construction() {
        let request = SurveyRequest::new("A1B2C3", "pilot")
            .with_url(Some("https://example.com/survey".to_string()));

        assert_eq!(request.worker_id, "A1B2C3");
        assert_eq!(request.group_name, "pilot");
        assert_eq!(request.url.as_deref(), Some("https://example.com/survey"));
        assert!(request.time.is_none());
    }

    #[test]
    fn test_parse_submit_time() {
        let parsed = parse_submit_time("2016-01-01T00:00:00Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_submit_time_rejects_garbage() {
        assert!(parse_submit_time("yesterday").is_err());
        assert!(parse_submit_time("2016-01-01 00:00:00").is_err());
    }
}
