//! Error types for the mailbox provider.

use thiserror::Error;

use crate::contract::{DownloadError, EmailNumber, ListingError};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Listing failed: {0}")]
    ListingFailed(#[source] ListingError),

    #[error("Email not found: {0}")]
    EmailNotFound(EmailNumber),

    #[error("Download failed for {key}: {source}")]
    DownloadFailed {
        key: String,
        #[source]
        source: DownloadError,
    },
}
