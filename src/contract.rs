//! # contract: collaborator interfaces for the mailbox provider
//!
//! This module defines the plain data types shared across the crate and the
//! three capability traits the provider is built from:
//!
//! - [`ListingClient`]: lists the objects stored under the mailbox.
//! - [`EmailCache`]: exposes a previously materialized numbered mapping.
//! - [`Downloader`]: fetches the raw body of a single object.
//!
//! ## Mocking & Testing
//! - Every trait is annotated for `mockall`, so tests can inject deterministic
//!   collaborators. Mocks are exported under the `test-export-mocks` feature
//!   (enabled by default) for use from the `tests/` directory.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;

/// Number assigned to an email, starting at 1 in listing order.
pub type EmailNumber = i64;

/// Numbered mailbox view: email number to descriptor.
pub type EmailMap = BTreeMap<EmailNumber, Arc<Email>>;

/// Error type for [`ListingClient`] implementations.
pub type ListingError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for [`Downloader`] implementations.
pub type DownloadError = Box<dyn std::error::Error + Send + Sync>;

/// Descriptor of one stored email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Email {
    /// Storage key of the object holding the message.
    pub id: String,
    /// Object size in bytes.
    pub size: i64,
}

/// One row of an object listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedObject {
    pub key: String,
    pub size: i64,
}

impl ListedObject {
    pub fn new(key: impl Into<String>, size: i64) -> Self {
        Self {
            key: key.into(),
            size,
        }
    }
}

/// Lists the objects backing the mailbox.
///
/// The order of the returned objects is significant: the Nth object becomes
/// email number N.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ListingClient: Send + Sync {
    async fn list_objects(&self) -> Result<Vec<ListedObject>, ListingError>;
}

/// Read access to a numbered mapping materialized elsewhere.
///
/// Population and invalidation belong to the embedding application.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait EmailCache: Send + Sync {
    /// Returns the cached mapping, or an empty map when nothing is cached.
    fn cached_emails(&self) -> EmailMap;
}

/// Fetches the raw body of a stored email.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn download(&self, key: &str) -> Result<Vec<u8>, DownloadError>;
}
