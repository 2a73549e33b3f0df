use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RankingError {
    /// A caller supplied argument is outside its accepted range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
