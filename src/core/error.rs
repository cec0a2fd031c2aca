use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavigationError {
    #[error("request for {url} failed with status {status}")]
    Status { url: String, status: u16 },
    #[error("request for {url} failed: {message}")]
    Network { url: String, message: String },
    #[error("markup from {url} has no .content container")]
    MissingContent { url: String },
    #[error("unknown template {0:?}")]
    UnknownTemplate(String),
}
