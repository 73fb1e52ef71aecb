use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScrollError {
    /// Another coordinator is running on this thread.
    #[error("a smooth-scroll coordinator is already active")]
    AlreadyActive,
    #[error("invalid scroll config: {0}")]
    Config(String),
}
