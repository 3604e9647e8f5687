//! Surface errors

/// Failure to apply a render operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// An element the operation patches is not in the document
    #[error("element .{0} not found")]
    MissingElement(&'static str),

    /// The details pane has not been constructed yet
    #[error("details pane not constructed")]
    NoDetailsPane,
}

/// Result alias for surface operations
pub type Result<T> = std::result::Result<T, SurfaceError>;
