use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Credentials file not found: {0}")]
    CredentialsNotFound(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Timestamp parse error: {0}")]
    TimestampParse(#[from] chrono::ParseError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
