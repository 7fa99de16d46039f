use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Hit {
    #[serde(rename = "HITId")]
    pub hit_id: String,
    pub title: String,
    pub creation_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Assignment {
    pub assignment_id: String,
    #[serde(rename = "HITId")]
    pub hit_id: String,
    pub worker_id: String,
    pub assignment_status: Option<String>,
    /// Submission timestamp in wire format `YYYY-MM-DDTHH:MM:SSZ`.
    pub submit_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchHitsResponse {
    pub total_num_results: u32,
    #[serde(rename = "HITs", default)]
    pub hits: Vec<Hit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetAssignmentsResponse {
    pub total_num_results: u32,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_wire_names() {
        let raw = r#"{
            "TotalNumResults": 1,
            "HITs": [
                {"HITId": "H1", "Title": "Color survey", "CreationTime": "2016-01-01T00:00:00Z"}
            ]
        }"#;

        let response: SearchHitsResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.total_num_results, 1);
        assert_eq!(response.hits[0].hit_id, "H1");
        assert_eq!(response.hits[0].title, "Color survey");
    }

    #[test]
    fn test_assignments_response_defaults_to_empty_page() {
        let raw = r#"{"TotalNumResults": 10}"#;

        let response: GetAssignmentsResponse = serde_json::from_str(raw).unwrap();
        assert!(response.assignments.is_empty());
    }
}
