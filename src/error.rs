use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("memory measurement unavailable: {0}")]
    MeasurementUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
