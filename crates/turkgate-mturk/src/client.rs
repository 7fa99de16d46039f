use crate::{
    models::{Assignment, GetAssignmentsResponse, SearchHitsResponse},
    Error, Result,
};
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::de::DeserializeOwned;
use sha2::Sha256;
use turkgate_core::AwsCredentials;

pub const DEFAULT_ENDPOINT: &str = "https://mechanicalturk.amazonaws.com";

/// Server-side page size of the assignment listing endpoint.
pub const ASSIGNMENTS_PAGE_SIZE: u32 = 10;

/// Listing defaults matching the requester tooling this replaces.
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_TITLE_SEARCH_PAGES: u32 = 4;

const SERVICE: &str = "AWSMechanicalTurkRequester";

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct MturkClient {
    client: Client,
    endpoint: String,
    credentials: AwsCredentials,
}

impl MturkClient {
    pub fn new(credentials: AwsCredentials) -> Self {
        Self::with_endpoint(credentials, DEFAULT_ENDPOINT.to_string())
    }

    pub fn with_endpoint(credentials: AwsCredentials, endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            credentials,
        }
    }

    /// Signature over service + operation + timestamp, keyed by the
    /// secret access key.
    fn sign(&self, operation: &str, timestamp: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(self.credentials.aws_secret_access_key.as_bytes())
                .expect("HMAC accepts keys of any length");
        mac.update(SERVICE.as_bytes());
        mac.update(operation.as_bytes());
        mac.update(timestamp.as_bytes());

        hex::encode(mac.finalize().into_bytes())
    }

    async fn call<T: DeserializeOwned>(
        &self,
        operation: &str,
        params: Vec<(&'static str, String)>,
    ) -> Result<T> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let signature = self.sign(operation, &timestamp);

        let mut query = vec![
            ("Service", SERVICE.to_string()),
            ("Operation", operation.to_string()),
            ("AWSAccessKeyId", self.credentials.aws_access_key_id.clone()),
            ("Timestamp", timestamp),
            ("Signature", signature),
        ];
        query.extend(params);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!("{}: {}", status, body)));
        }

        Ok(response.json::<T>().await?)
    }

    /// One page of the HIT listing, newest first.
    pub async fn search_hits(
        &self,
        page_size: u32,
        page_number: u32,
    ) -> Result<SearchHitsResponse> {
        tracing::debug!(page_size, page_number, "Searching HITs");

        self.call(
            "SearchHITs",
            vec![
                ("SortProperty", "CreationTime".to_string()),
                ("SortDirection", "Descending".to_string()),
                ("PageSize", page_size.to_string()),
                ("PageNumber", page_number.to_string()),
            ],
        )
        .await
    }

    /// One page of assignments for a HIT.
    pub async fn get_assignments(
        &self,
        hit_id: &str,
        page_number: u32,
    ) -> Result<GetAssignmentsResponse> {
        tracing::debug!(hit_id, page_number, "Fetching assignments");

        self.call(
            "GetAssignmentsForHIT",
            vec![
                ("HITId", hit_id.to_string()),
                ("PageSize", ASSIGNMENTS_PAGE_SIZE.to_string()),
                ("PageNumber", page_number.to_string()),
            ],
        )
        .await
    }

    /// Titles of recent HITs across `num_pages` listing pages.
    ///
    /// Pages are fetched one at a time against a live remote; the same
    /// title can appear twice when the listing shifts between calls.
    pub async fn get_recent_hit_titles(
        &self,
        num_recent: u32,
        num_pages: u32,
    ) -> Result<Vec<String>> {
        let mut all_titles = Vec::new();

        for page in 1..=num_pages {
            let response = self.search_hits(num_recent, page).await?;
            all_titles.extend(response.hits.into_iter().map(|hit| hit.title));
        }

        Ok(all_titles)
    }

    /// IDs of HITs whose title matches `title` exactly.
    pub async fn get_hit_ids_by_title(
        &self,
        title: &str,
        num_recent: u32,
        num_pages: u32,
    ) -> Result<Vec<String>> {
        let mut all_matches = Vec::new();

        for page in 1..=num_pages {
            let response = self.search_hits(num_recent, page).await?;
            all_matches.extend(
                response
                    .hits
                    .into_iter()
                    .filter(|hit| hit.title == title)
                    .map(|hit| hit.hit_id),
            );
        }

        Ok(all_matches)
    }

    /// All assignments for one HIT.
    ///
    /// Reads the total from the first response, then walks
    /// `total / 10 + 1` pages. When the total is an exact multiple of
    /// the page size the last page comes back empty; that over-fetch is
    /// harmless and kept.
    pub async fn get_assignments_from_hit_id(&self, hit_id: &str) -> Result<Vec<Assignment>> {
        let num_total = self.get_assignments(hit_id, 1).await?.total_num_results;
        let num_pages = num_total / ASSIGNMENTS_PAGE_SIZE + 1;

        let mut assignments = Vec::new();
        for page in 1..=num_pages {
            assignments.extend(self.get_assignments(hit_id, page).await?.assignments);
        }

        Ok(assignments)
    }

    /// Resolve a title to HIT ids, then concatenate every HIT's
    /// assignments.
    pub async fn get_assignments_by_title(&self, title: &str) -> Result<Vec<Assignment>> {
        let all_hit_ids = self
            .get_hit_ids_by_title(title, DEFAULT_PAGE_SIZE, DEFAULT_TITLE_SEARCH_PAGES)
            .await?;

        let mut all_assignments = Vec::new();
        for hit_id in all_hit_ids {
            all_assignments.extend(self.get_assignments_from_hit_id(&hit_id).await?);
        }

        Ok(all_assignments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> MturkClient {
        MturkClient::with_endpoint(
            AwsCredentials {
                aws_access_key_id: "AKIDEXAMPLE".to_string(),
                aws_secret_access_key: "wJalrXUtnFEMI".to_string(),
            },
            server.uri(),
        )
    }

    fn hit(id: &str, title: &str) -> serde_json::Value {
        json!({"HITId": id, "Title": title, "CreationTime": "2016-01-01T00:00:00Z"})
    }

    fn assignment(id: &str, worker: &str) -> serde_json::Value {
        json!({
            "AssignmentId": id,
            "HITId": "H1",
            "WorkerId": worker,
            "AssignmentStatus": "Submitted",
            "SubmitTime": "2016-01-01T00:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_search_hits_sends_sort_and_auth_params() {
        let server = MockServer::start().await;
        let client = test_client(&server);

        Mock::given(method("GET"))
            .and(query_param("Operation", "SearchHITs"))
            .and(query_param("SortProperty", "CreationTime"))
            .and(query_param("SortDirection", "Descending"))
            .and(query_param("PageSize", "10"))
            .and(query_param("PageNumber", "1"))
            .and(query_param("AWSAccessKeyId", "AKIDEXAMPLE"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "TotalNumResults": 1,
                "HITs": [hit("H1", "Color survey")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client.search_hits(10, 1).await.unwrap();
        assert_eq!(response.hits.len(), 1);
        assert_eq!(response.hits[0].title, "Color survey");
    }

    #[tokio::test]
    async fn test_recent_titles_collects_across_pages() {
        let server = MockServer::start().await;
        let client = test_client(&server);

        Mock::given(method("GET"))
            .and(query_param("Operation", "SearchHITs"))
            .and(query_param("PageNumber", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "TotalNumResults": 3,
                "HITs": [hit("H1", "First"), hit("H2", "Second")]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(query_param("Operation", "SearchHITs"))
            .and(query_param("PageNumber", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "TotalNumResults": 3,
                "HITs": [hit("H3", "Third")]
            })))
            .mount(&server)
            .await;

        let titles = client.get_recent_hit_titles(2, 2).await.unwrap();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn test_hit_ids_by_title_is_exact_match() {
        let server = MockServer::start().await;
        let client = test_client(&server);

        Mock::given(method("GET"))
            .and(query_param("Operation", "SearchHITs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "TotalNumResults": 3,
                "HITs": [
                    hit("H1", "Color survey"),
                    hit("H2", "Color survey 2"),
                    hit("H3", "Color survey")
                ]
            })))
            .mount(&server)
            .await;

        let ids = client.get_hit_ids_by_title("Color survey", 10, 1).await.unwrap();
        assert_eq!(ids, vec!["H1", "H3"]);
    }

    #[tokio::test]
    async fn test_assignment_pagination_exact_multiple_fetches_empty_tail_page() {
        let server = MockServer::start().await;
        let client = test_client(&server);

        let page_one: Vec<serde_json::Value> = (0..10)
            .map(|i| assignment(&format!("A{}", i), &format!("W{}", i)))
            .collect();

        // Page 1 answers the count probe and the first loop iteration.
        Mock::given(method("GET"))
            .and(query_param("Operation", "GetAssignmentsForHIT"))
            .and(query_param("PageNumber", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "TotalNumResults": 10,
                "Assignments": page_one
            })))
            .expect(2)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(query_param("Operation", "GetAssignmentsForHIT"))
            .and(query_param("PageNumber", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "TotalNumResults": 10,
                "Assignments": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let assignments = client.get_assignments_from_hit_id("H1").await.unwrap();
        assert_eq!(assignments.len(), 10);
    }

    #[tokio::test]
    async fn test_assignment_pagination_partial_last_page() {
        let server = MockServer::start().await;
        let client = test_client(&server);

        let page_one: Vec<serde_json::Value> = (0..10)
            .map(|i| assignment(&format!("A{}", i), &format!("W{}", i)))
            .collect();
        let page_two: Vec<serde_json::Value> = (10..15)
            .map(|i| assignment(&format!("A{}", i), &format!("W{}", i)))
            .collect();

        Mock::given(method("GET"))
            .and(query_param("Operation", "GetAssignmentsForHIT"))
            .and(query_param("PageNumber", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "TotalNumResults": 15,
                "Assignments": page_one
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(query_param("Operation", "GetAssignmentsForHIT"))
            .and(query_param("PageNumber", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "TotalNumResults": 15,
                "Assignments": page_two
            })))
            .expect(1)
            .mount(&server)
            .await;

        let assignments = client.get_assignments_from_hit_id("H1").await.unwrap();
        assert_eq!(assignments.len(), 15);
        assert_eq!(assignments[14].worker_id, "W14");
    }

    #[tokio::test]
    async fn test_api_error_surfaces_status() {
        let server = MockServer::start().await;
        let client = test_client(&server);

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("AccessDenied"))
            .mount(&server)
            .await;

        let result = client.search_hits(10, 1).await;
        match result {
            Err(Error::Api(message)) => {
                assert!(message.contains("403"));
                assert!(message.contains("AccessDenied"));
            }
            other => panic!("expected Api error, got {:?}", other.map(|_| ())),
        }
    }
}
