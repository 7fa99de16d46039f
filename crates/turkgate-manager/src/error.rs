use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing column in results file: {0}")]
    MissingColumn(String),

    #[error("Credentials error: {0}")]
    Core(#[from] turkgate_core::Error),

    #[error("Database error: {0}")]
    Db(#[from] turkgate_db::Error),

    #[error("Marketplace error: {0}")]
    Mturk(#[from] turkgate_mturk::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
