use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open the yacht table: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read the yacht table: {0}")]
    Csv(#[from] csv::Error),
    #[error("no header row with a `name` column")]
    MissingHeader,
    #[error("the yacht table has no usable rows")]
    Empty,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a non-negative number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} must be at least 1")]
    Zero { key: &'static str },
}
