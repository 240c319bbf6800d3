//! Error taxonomy for resource resolution.

use thiserror::Error;

/// Error type for resource operations.
///
/// Plain lookups report a missing resource as `None`; this type is used by
/// the operations that surface *why* a resource could not be produced.
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to read resource '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid URI '{locator}': {reason}")]
    InvalidUri { locator: String, reason: String },

    #[error("A defining unit is already installed for this process")]
    AlreadyInstalled,

    #[error("Resource store lock poisoned")]
    Poisoned,
}

impl ResourceError {
    /// Returns `true` for [`ResourceError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResourceError::NotFound(_))
    }
}
