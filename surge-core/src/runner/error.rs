pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("task join error: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("`requests` must be a positive integer")]
    InvalidRequests,

    #[error("`concurrency` must be a positive integer")]
    InvalidConcurrency,

    #[error("`timeout` must be a positive duration")]
    InvalidTimeout,

    #[error("`levels` must be a non-empty list of positive integers")]
    InvalidLevels,
}
