/// Result type for container operations
pub type Result<T> = std::result::Result<T, Error>;

/// Broad category of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An index fell outside the live range of a container
    OutOfRange,
    /// The operation is not valid for the current state of the container
    InvalidOperation,
}

/// Errors returned by `LinkedList` and `Vector`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("the list is empty")]
    EmptyList,

    #[error("no node holds the requested value")]
    ValueNotFound,

    #[error("the node is no longer in the list")]
    DetachedNode,
}

impl Error {
    /// Returns the category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::IndexOutOfRange { .. } => ErrorKind::OutOfRange,
            Error::EmptyList | Error::ValueNotFound | Error::DetachedNode => {
                ErrorKind::InvalidOperation
            }
        }
    }
}
