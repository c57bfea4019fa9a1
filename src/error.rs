use thiserror::Error;

#[derive(Debug, Error)]
pub enum BstError {
    #[error("node count must be at least 1")]
    InvalidNodeCount,

    #[error("node count {0} does not fit the key type")]
    KeyRangeOverflow(usize),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BstError>;
