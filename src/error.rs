//! Error kinds shared by the lookup and wishlist pipelines.

use thiserror::Error;

/// Failures of a single lookup or wishlist export. All are terminal for the
/// operation they occur in.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure: connection refused, timeout, DNS.
    #[error("Network error: {0}")]
    Network(String),

    /// A body was received but could not be parsed as markup.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Well-formed response without the expected data block.
    #[error("Item not found: {0}")]
    NotFound(String),

    /// Access key or secret is empty or malformed.
    #[error("Invalid credentials: {0}")]
    Credential(String),

    /// Pagination reached the configured page ceiling with more pages left.
    #[error("Page limit exceeded: wishlist has more than {0} pages")]
    PageLimitExceeded(u32),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;
