use thiserror::Error;

/// Failures that can stop the process from coming up. Everything after
/// startup is local to one operation or one connection and never fatal.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
