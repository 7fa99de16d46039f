pub mod client;
pub mod models;
pub mod error;

// Re-exports
pub use client::{MturkClient, ASSIGNMENTS_PAGE_SIZE, DEFAULT_PAGE_SIZE, DEFAULT_TITLE_SEARCH_PAGES};
pub use models::{Assignment, GetAssignmentsResponse, Hit, SearchHitsResponse};
pub use error::{Error, Result};
