use crate::cookies::record::CookieRecord;
use crate::cookies::store::{CookieStore, StoreFuture};
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory [`CookieStore`].
///
/// Stands in for the browser's cookie store in tests and headless use.
/// Cookies are keyed by domain and replaced on matching name and path.
#[derive(Clone)]
pub struct MemoryCookieStore {
    // Store: Map<Domain, List<Cookie>>
    store: Arc<DashMap<String, Vec<CookieRecord>>>,
}

impl Default for MemoryCookieStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self {
            store: Arc::new(DashMap::new()),
        }
    }

    fn domain_key(domain: &str) -> String {
        domain.to_ascii_lowercase()
    }

    /// Add or replace a cookie. Malformed records are rejected.
    pub fn set_cookie(&self, cookie: CookieRecord) -> bool {
        if !cookie.is_well_formed() {
            tracing::debug!(domain = %cookie.domain, "rejecting malformed cookie");
            return false;
        }

        let mut entry = self
            .store
            .entry(Self::domain_key(&cookie.domain))
            .or_default();

        // Remove existing if name/path match
        entry.retain(|c| c.name != cookie.name || c.path != cookie.path);
        entry.push(cookie);
        true
    }

    /// Remove the cookie with the same domain, name and path.
    pub fn remove_cookie(&self, cookie: &CookieRecord) {
        let key = Self::domain_key(&cookie.domain);
        let now_empty = match self.store.get_mut(&key) {
            Some(mut entry) => {
                entry.retain(|c| c.name != cookie.name || c.path != cookie.path);
                entry.is_empty()
            }
            None => false,
        };

        if now_empty {
            self.store.remove_if(&key, |_, cookies| cookies.is_empty());
        }
    }

    /// Get total cookie count.
    pub fn total_cookie_count(&self) -> usize {
        self.store.iter().map(|e| e.value().len()).sum()
    }

    /// Clear all cookies.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Iterate over all cookies.
    pub fn iter_all_cookies(&self) -> impl Iterator<Item = CookieRecord> + '_ {
        self.store.iter().flat_map(|entry| entry.value().clone())
    }
}

impl CookieStore for MemoryCookieStore {
    fn all_cookies(&self) -> StoreFuture<Vec<CookieRecord>> {
        let cookies: Vec<CookieRecord> = self.iter_all_cookies().collect();
        Box::pin(std::future::ready(cookies))
    }

    fn delete(&self, cookie: CookieRecord) -> StoreFuture<()> {
        let store = self.clone();
        Box::pin(async move { store.remove_cookie(&cookie) })
    }

    fn insert(&self, cookie: CookieRecord) -> StoreFuture<bool> {
        let store = self.clone();
        Box::pin(async move { store.set_cookie(cookie) })
    }
}
