use thiserror::Error;

/// Failures surfaced by the gallery core.
///
/// Payloads are plain strings so the error can be cloned into UI messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GalleryError {
    /// Fetch failure, non-success response, or an undecodable body.
    #[error("network error: {0}")]
    Network(String),
    /// Missing or unusable configuration, such as an absent API key.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Programmer error at an API boundary.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl GalleryError {
    /// Message suitable for the on-screen error banner.
    pub fn display_message(&self) -> &str {
        match self {
            GalleryError::Network(message)
            | GalleryError::Configuration(message)
            | GalleryError::InvalidArgument(message) => message,
        }
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;
