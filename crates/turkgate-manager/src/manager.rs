use crate::{csv_import, Result};
use std::path::Path;
use turkgate_core::{request::parse_submit_time, Credentials, SurveyRequest};
use turkgate_db::{Database, SurveyRequestRecord};
use turkgate_mturk::{Assignment, MturkClient};

/// Create and manage participant groups.
///
/// Owns one database handle and one marketplace client for its
/// lifetime; call [`TurkGateManager::close`] when done.
pub struct TurkGateManager {
    db: Database,
    mturk: MturkClient,
}

impl TurkGateManager {
    /// Connect to MySQL and build the marketplace client from one
    /// credentials bundle.
    pub async fn connect(credentials: &Credentials) -> Result<Self> {
        let db = Database::new(&credentials.mysql.url()).await?;
        let mturk = MturkClient::new(credentials.aws.clone());

        Ok(Self { db, mturk })
    }

    /// Assemble a manager from already-built handles.
    pub fn from_parts(db: Database, mturk: MturkClient) -> Self {
        Self { db, mturk }
    }

    /// Create the SurveyRequest table if it does not exist.
    pub async fn init_schema(&self) -> Result<()> {
        self.db.init_schema().await?;
        Ok(())
    }

    // ========================================================================
    // Table Operations
    // ========================================================================

    pub async fn get_groups(&self) -> Result<Vec<String>> {
        Ok(self.db.get_groups().await?)
    }

    pub async fn get_workers(&self) -> Result<Vec<String>> {
        Ok(self.db.get_workers().await?)
    }

    pub async fn get_requests_by_group(&self, group: &str) -> Result<Vec<SurveyRequestRecord>> {
        Ok(self.db.get_requests_by_group(group).await?)
    }

    pub async fn get_workers_by_group(&self, group: &str) -> Result<Vec<String>> {
        Ok(self.db.get_workers_by_group(group).await?)
    }

    pub async fn add_requests(&self, requests: &[SurveyRequest]) -> Result<()> {
        tracing::info!(count = requests.len(), "Adding requests");
        Ok(self.db.add_requests(requests).await?)
    }

    pub async fn remove_requests_by_group(&self, group: &str) -> Result<u64> {
        let removed = self.db.remove_requests_by_group(group).await?;
        tracing::info!(group, removed, "Removed group");
        Ok(removed)
    }

    pub async fn copy_group(&self, existing: &str, new_group: &str) -> Result<()> {
        tracing::info!(existing, new_group, "Copying group");
        Ok(self.db.copy_group(existing, new_group).await?)
    }

    pub async fn rename_group(&self, existing: &str, new_group: &str) -> Result<()> {
        tracing::info!(existing, new_group, "Renaming group");
        Ok(self.db.rename_group(existing, new_group).await?)
    }

    // ========================================================================
    // Marketplace Operations
    // ========================================================================

    pub async fn get_recent_hit_titles(
        &self,
        num_recent: u32,
        num_pages: u32,
    ) -> Result<Vec<String>> {
        Ok(self.mturk.get_recent_hit_titles(num_recent, num_pages).await?)
    }

    pub async fn get_hit_ids_by_title(
        &self,
        title: &str,
        num_recent: u32,
        num_pages: u32,
    ) -> Result<Vec<String>> {
        Ok(self
            .mturk
            .get_hit_ids_by_title(title, num_recent, num_pages)
            .await?)
    }

    pub async fn get_assignments_from_hit_id(&self, hit_id: &str) -> Result<Vec<Assignment>> {
        Ok(self.mturk.get_assignments_from_hit_id(hit_id).await?)
    }

    pub async fn get_assignments_by_title(&self, title: &str) -> Result<Vec<Assignment>> {
        Ok(self.mturk.get_assignments_by_title(title).await?)
    }

    /// Fetch a HIT's assignments by title and map them into requests,
    /// ready for [`TurkGateManager::add_requests`].
    pub async fn make_requests_from_hit_title(
        &self,
        title: &str,
        group: &str,
        url: Option<&str>,
        keep_time: bool,
    ) -> Result<Vec<SurveyRequest>> {
        let assignments = self.get_assignments_by_title(title).await?;
        make_requests_from_assignments(&assignments, group, url, keep_time)
    }

    /// Read requests from a HIT results file.
    pub fn make_requests_from_csv(
        &self,
        results_file: &Path,
        group: &str,
        url: Option<&str>,
        id_col: &str,
        time_col: &str,
    ) -> Result<Vec<SurveyRequest>> {
        csv_import::requests_from_csv(results_file, group, url, id_col, time_col)
    }

    /// Close the MySQL pool. The marketplace client holds no
    /// long-lived resources and is released on drop.
    pub async fn close(self) {
        self.db.close().await;
    }
}

/// Map marketplace assignments into survey requests.
///
/// `url` and `group` apply uniformly to the batch. With `keep_time`
/// the submission timestamp is parsed from the wire format; otherwise
/// every request gets no timestamp.
pub fn make_requests_from_assignments(
    assignments: &[Assignment],
    group: &str,
    url: Option<&str>,
    keep_time: bool,
) -> Result<Vec<SurveyRequest>> {
    let mut requests = Vec::with_capacity(assignments.len());

    for assignment in assignments {
        let time = if keep_time {
            Some(parse_submit_time(&assignment.submit_time)?)
        } else {
            None
        };

        requests.push(SurveyRequest {
            worker_id: assignment.worker_id.clone(),
            url: url.map(str::to_string),
            group_name: group.to_string(),
            time,
        });
    }

    Ok(requests)
}
