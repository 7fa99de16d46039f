use crate::{Error, Result};
use std::io::Read;
use std::path::Path;
use turkgate_core::{request::parse_submit_time, SurveyRequest};

/// Column names as they appear in marketplace results files.
pub const DEFAULT_ID_COLUMN: &str = "WorkerId";
pub const DEFAULT_TIME_COLUMN: &str = "SubmitTime";

/// Read survey requests from a HIT results file.
///
/// Only the worker-id and submit-time columns are consumed; `group`
/// and `url` apply uniformly. An empty time cell maps to no timestamp;
/// a non-empty one must be in the wire format.
pub fn requests_from_csv(
    path: &Path,
    group: &str,
    url: Option<&str>,
    id_col: &str,
    time_col: &str,
) -> Result<Vec<SurveyRequest>> {
    let file = std::fs::File::open(path)?;
    requests_from_reader(file, group, url, id_col, time_col)
}

pub fn requests_from_reader<R: Read>(
    reader: R,
    group: &str,
    url: Option<&str>,
    id_col: &str,
    time_col: &str,
) -> Result<Vec<SurveyRequest>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let id_idx = headers
        .iter()
        .position(|header| header == id_col)
        .ok_or_else(|| Error::MissingColumn(id_col.to_string()))?;
    let time_idx = headers
        .iter()
        .position(|header| header == time_col)
        .ok_or_else(|| Error::MissingColumn(time_col.to_string()))?;

    let mut requests = Vec::new();
    for record in csv_reader.records() {
        let record = record?;

        let worker_id = record.get(id_idx).unwrap_or_default().to_string();
        let raw_time = record.get(time_idx).unwrap_or_default();

        let time = if raw_time.is_empty() {
            None
        } else {
            Some(parse_submit_time(raw_time)?)
        };

        requests.push(SurveyRequest {
            worker_id,
            url: url.map(str::to_string),
            group_name: group.to_string(),
            time,
        });
    }

    Ok(requests)
}
