use thiserror::Error;

/// Top-level error type for the tcpping library.
#[derive(Error, Debug)]
pub enum TcppingError {
    /// DNS resolution failure, forward or reverse.
    #[error("dns: {0}")]
    Dns(String),
    /// Invalid session configuration.
    #[error("config: {0}")]
    Config(String),
    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Other error cases.
    #[error("other: {0}")]
    Other(String),
}

impl From<trust_dns_resolver::error::ResolveError> for TcppingError {
    fn from(err: trust_dns_resolver::error::ResolveError) -> Self {
        TcppingError::Dns(err.to_string())
    }
}
