use crate::{models::SurveyRequestRecord, Result};
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{MySql, Pool};
use turkgate_core::SurveyRequest;

#[derive(Clone)]
pub struct Database {
    pool: Pool<MySql>,
}

impl Database {
    /// Create new database connection
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Initialize database schema
    ///
    /// Assumes TurkGate table defaults; the index lives in the table
    /// definition because MySQL has no CREATE INDEX IF NOT EXISTS.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS SurveyRequest (
                requestID BIGINT PRIMARY KEY AUTO_INCREMENT,
                workerID  VARCHAR(255) NOT NULL,
                URL       TEXT NULL,
                groupName VARCHAR(255) NOT NULL,
                time      TIMESTAMP NULL,
                INDEX idx_surveyrequest_group (groupName)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ========================================================================
    // Query Operations
    // ========================================================================

    /// Distinct group names present in the table. No ordering guarantee.
    pub async fn get_groups(&self) -> Result<Vec<String>> {
        let groups = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT groupName FROM SurveyRequest",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(groups)
    }

    /// Distinct worker IDs across all requests.
    pub async fn get_workers(&self) -> Result<Vec<String>> {
        let workers = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT workerID FROM SurveyRequest",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(workers)
    }

    /// All rows for one group.
    pub async fn get_requests_by_group(&self, group: &str) -> Result<Vec<SurveyRequestRecord>> {
        let records = sqlx::query_as::<_, SurveyRequestRecord>(
            "SELECT * FROM SurveyRequest WHERE groupName = ?",
        )
        .bind(group)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Worker IDs for one group, one entry per matching row (not deduplicated).
    pub async fn get_workers_by_group(&self, group: &str) -> Result<Vec<String>> {
        let workers = sqlx::query_scalar::<_, String>(
            "SELECT workerID FROM SurveyRequest WHERE groupName = ?",
        )
        .bind(group)
        .fetch_all(&self.pool)
        .await?;

        Ok(workers)
    }

    // ========================================================================
    // Mutating Operations
    // ========================================================================

    /// Bulk insert in a single transaction; the whole batch commits or
    /// fails together.
    pub async fn add_requests(&self, requests: &[SurveyRequest]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for request in requests {
            sqlx::query(
                r#"
                INSERT INTO SurveyRequest (workerID, URL, groupName, time)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(&request.worker_id)
            .bind(&request.url)
            .bind(&request.group_name)
            .bind(request.time)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Delete every row of a group. Returns the number of rows removed.
    pub async fn remove_requests_by_group(&self, group: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM SurveyRequest WHERE groupName = ?")
            .bind(group)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Copy all requests of `existing` under the name `new_group`.
    pub async fn copy_group(&self, existing: &str, new_group: &str) -> Result<()> {
        let rows = self.get_requests_by_group(existing).await?;

        let mut copies = Vec::with_capacity(rows.len());
        for row in rows {
            copies.push(SurveyRequest {
                worker_id: row.worker_id,
                url: row.url,
                group_name: new_group.to_string(),
                time: row.time,
            });
        }

        self.add_requests(&copies).await
    }

    /// Rename a group by copying it and deleting the original.
    ///
    /// The two steps are separate commits: a failure in between leaves
    /// both groups populated.
    pub async fn rename_group(&self, existing: &str, new_group: &str) -> Result<()> {
        self.copy_group(existing, new_group).await?;
        self.remove_requests_by_group(existing).await?;

        Ok(())
    }

    /// Close the underlying connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
