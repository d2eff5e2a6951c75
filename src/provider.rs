//! Numbered mailbox view over a bucket listing.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::contract::{
    Downloader, Email, EmailCache, EmailMap, EmailNumber, ListedObject, ListingClient,
};
use crate::error::ProviderError;

/// Serves numbered emails from a [`ListingClient`], or from an [`EmailCache`]
/// when one is attached and holds entries.
///
/// The cache is only ever read here. Callers sharing a cache between
/// providers are responsible for coordinating whoever writes it.
pub struct S3Provider<L> {
    client: L,
    cache: Option<Arc<dyn EmailCache>>,
}

impl<L: ListingClient> S3Provider<L> {
    pub fn new(client: L) -> Self {
        Self {
            client,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn EmailCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Lists all emails except those whose number appears in `excluded`.
    ///
    /// A non-empty cache is authoritative: the listing client is not called.
    /// Numbers in `excluded` that match no email are ignored.
    pub async fn list_emails(&self, excluded: &[EmailNumber]) -> Result<EmailMap, ProviderError> {
        let emails = match self.cached() {
            Some(cached) => {
                info!(emails = cached.len(), "Serving emails from cache");
                cached
            }
            None => {
                let objects = self.client.list_objects().await.map_err(|e| {
                    error!(error = %e, "Listing objects failed");
                    ProviderError::ListingFailed(e)
                })?;
                info!(objects = objects.len(), "Listed objects from bucket");
                number_objects(objects)
            }
        };

        let filtered = exclude(emails, excluded);
        debug!(
            emails = filtered.len(),
            excluded = excluded.len(),
            "Applied exclusions"
        );
        Ok(filtered)
    }

    /// Looks up a single email by number.
    pub async fn email(&self, number: EmailNumber) -> Result<Arc<Email>, ProviderError> {
        let mut emails = self.list_emails(&[]).await?;
        emails
            .remove(&number)
            .ok_or(ProviderError::EmailNotFound(number))
    }

    fn cached(&self) -> Option<EmailMap> {
        let cache = self.cache.as_ref()?;
        let emails = cache.cached_emails();
        if emails.is_empty() {
            debug!("Cache attached but empty, falling back to listing");
            return None;
        }
        Some(emails)
    }
}

/// Assigns numbers 1, 2, 3, ... to `objects` in the order given.
///
/// Duplicate keys are kept; each occurrence gets its own number.
pub fn number_objects(objects: Vec<ListedObject>) -> EmailMap {
    (1..)
        .zip(objects)
        .map(|(number, object)| {
            (
                number,
                Arc::new(Email {
                    id: object.key,
                    size: object.size,
                }),
            )
        })
        .collect()
}

fn exclude(mut emails: EmailMap, excluded: &[EmailNumber]) -> EmailMap {
    if excluded.is_empty() {
        return emails;
    }
    let excluded: HashSet<EmailNumber> = excluded.iter().copied().collect();
    emails.retain(|number, _| !excluded.contains(number));
    emails
}

/// Fetches the raw body of `email` through `downloader`.
pub async fn retrieve_email<D>(downloader: &D, email: &Email) -> Result<Vec<u8>, ProviderError>
where
    D: Downloader + ?Sized,
{
    match downloader.download(&email.id).await {
        Ok(body) => {
            info!(key = %email.id, bytes = body.len(), "Downloaded email body");
            Ok(body)
        }
        Err(e) => {
            error!(key = %email.id, error = %e, "Downloading email body failed");
            Err(ProviderError::DownloadFailed {
                key: email.id.clone(),
                source: e,
            })
        }
    }
}
