use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use turkgate_core::SurveyRequest;

/// One row of the `SurveyRequest` table.
///
/// Column names follow the TurkGate defaults, hence the renames.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SurveyRequestRecord {
    #[sqlx(rename = "requestID")]
    pub request_id: i64,
    #[sqlx(rename = "workerID")]
    pub worker_id: String,
    #[sqlx(rename = "URL")]
    pub url: Option<String>,
    #[sqlx(rename = "groupName")]
    pub group_name: String,
    pub time: Option<DateTime<Utc>>,
}

impl From<SurveyRequestRecord> for SurveyRequest {
    fn from(record: SurveyRequestRecord) -> Self {
        SurveyRequest {
            worker_id: record.worker_id,
            url: record.url,
            group_name: record.group_name,
            time: record.time,
        }
    }
}
