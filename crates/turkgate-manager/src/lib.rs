pub mod manager;
pub mod csv_import;
pub mod error;

// Re-exports
pub use manager::{make_requests_from_assignments, TurkGateManager};
pub use csv_import::{DEFAULT_ID_COLUMN, DEFAULT_TIME_COLUMN};
pub use error::{Error, Result};
