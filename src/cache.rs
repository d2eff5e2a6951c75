use tracing::info;

use crate::contract::{EmailCache, EmailMap, ListedObject};
use crate::provider::number_objects;

/// In-memory [`EmailCache`] holding a mapping built by the embedding
/// application. Share it between providers through an `Arc`.
#[derive(Debug, Default, Clone)]
pub struct MemoryCache {
    emails: EmailMap,
}

impl MemoryCache {
    pub fn new(emails: EmailMap) -> Self {
        info!(emails = emails.len(), "Email cache populated");
        Self { emails }
    }

    /// Numbers `objects` the same way a live listing would and caches the result.
    pub fn from_listing(objects: Vec<ListedObject>) -> Self {
        Self::new(number_objects(objects))
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

impl EmailCache for MemoryCache {
    fn cached_emails(&self) -> EmailMap {
        self.emails.clone()
    }
}
