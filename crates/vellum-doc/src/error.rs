//! Error types for document content operations.

/// Errors that can occur during content operations.
///
/// Every bounds check happens before any mutation begins, so a returned
/// error always means the store and mark index are untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// An offset or range argument falls outside the current document bounds.
    InvalidLocation {
        /// The offending offset.
        offset: usize,
        /// The document length at the time of the call.
        len: usize,
    },
    /// A count argument that cannot address any valid range (the range end
    /// overflows the address space).
    InvalidLength {
        /// The offending count.
        count: usize,
    },
    /// `undo` was called on a token that has already been reverted.
    CannotUndo,
    /// `redo` was called on a token that is still applied.
    CannotRedo,
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLocation { offset, len } => {
                write!(f, "invalid location {} in document of length {}", offset, len)
            }
            Self::InvalidLength { count } => {
                write!(f, "invalid length {}", count)
            }
            Self::CannotUndo => write!(f, "edit has already been reverted"),
            Self::CannotRedo => write!(f, "edit is still applied"),
        }
    }
}

impl std::error::Error for ContentError {}
