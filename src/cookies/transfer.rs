//! Cookie export, import and clearing against a [`CookieStore`].
//!
//! Sealing and opening containers runs on the blocking thread pool because
//! key derivation is slow. Store operations fan out and are
//! joined before a result is reported.

use crate::base::guarderror::GuardError;
use crate::cookies::container::ExportContainer;
use crate::cookies::record::CookieRecord;
use crate::cookies::store::CookieStore;
use futures::future::join_all;
use std::fmt;
use std::sync::Arc;
use time::{Duration, OffsetDateTime};
use zeroize::Zeroizing;

/// What to export and how.
#[derive(Clone, Default)]
pub struct ExportOptions {
    /// Domain suffixes; a cookie is exported if its domain contains any of them.
    pub domains: Vec<String>,
    /// Encrypt with this password when set and non-empty.
    pub password: Option<Zeroizing<String>>,
    /// Override every expiry to `now + validity`.
    pub validity: Option<Duration>,
}

impl ExportOptions {
    /// Create options with no domains, no password and original expiries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a domain suffix.
    pub fn domain(mut self, suffix: impl Into<String>) -> Self {
        self.domains.push(suffix.into());
        self
    }

    /// Set the domain suffixes.
    pub fn domains<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domains = suffixes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the export password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(Zeroizing::new(password.into()));
        self
    }

    /// Set a fixed validity window.
    pub fn validity(mut self, validity: Duration) -> Self {
        self.validity = Some(validity);
        self
    }

    /// The password if it would actually encrypt.
    pub fn effective_password(&self) -> Option<&str> {
        self.password
            .as_deref()
            .map(String::as_str)
            .filter(|p| !p.is_empty())
    }

    /// Filter `cookies` and apply the validity window.
    pub fn select(&self, cookies: Vec<CookieRecord>, now: OffsetDateTime) -> Vec<CookieRecord> {
        cookies
            .into_iter()
            .filter(|cookie| cookie.matches_any_domain(&self.domains))
            .map(|cookie| match self.validity {
                Some(validity) => cookie.with_validity(now, validity),
                None => cookie,
            })
            .collect()
    }
}

impl fmt::Debug for ExportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportOptions")
            .field("domains", &self.domains)
            .field("encrypted", &self.effective_password().is_some())
            .field("validity", &self.validity)
            .finish()
    }
}

/// Moves cookies between a store and export files.
#[derive(Clone)]
pub struct CookieTransfer {
    store: Arc<dyn CookieStore>,
}

impl CookieTransfer {
    pub fn new(store: Arc<dyn CookieStore>) -> Self {
        Self { store }
    }

    /// Export matching cookies as container JSON.
    pub async fn export(&self, options: &ExportOptions) -> Result<String, GuardError> {
        let records = options.select(self.store.all_cookies().await, OffsetDateTime::now_utc());
        let count = records.len();
        let password = options.effective_password().map(|p| Zeroizing::new(p.to_string()));
        let encrypted = password.is_some();

        let json = tokio::task::spawn_blocking(move || {
            ExportContainer::seal(&records, password.as_deref().map(String::as_str))?.to_json()
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "cookie export task failed");
            GuardError::EncryptionFailed
        })??;

        tracing::info!(count, encrypted, "cookie export complete");
        Ok(json)
    }

    /// Parse export text (container or legacy list) and import it.
    pub async fn import(&self, text: &str, password: Option<&str>) -> Result<usize, GuardError> {
        let container = ExportContainer::parse(text)?;
        self.import_container(container, password).await
    }

    /// Open a container and insert its cookies. Returns how many the store
    /// accepted.
    pub async fn import_container(
        &self,
        container: ExportContainer,
        password: Option<&str>,
    ) -> Result<usize, GuardError> {
        let encrypted = container.is_encrypted;
        let password = password.map(|p| Zeroizing::new(p.to_string()));

        let records = tokio::task::spawn_blocking(move || {
            container.open(password.as_deref().map(String::as_str))
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "cookie import task failed");
            GuardError::EncryptionFailed
        })?
        .inspect_err(|e| tracing::warn!(error = %e, encrypted, "cookie import failed"))?;

        let total = records.len();
        let accepted = self.insert_all(records).await;

        tracing::info!(accepted, total, encrypted, "cookie import complete");
        Ok(accepted)
    }

    /// Insert every record concurrently; returns the number accepted.
    pub async fn insert_all(&self, records: Vec<CookieRecord>) -> usize {
        let inserts = records.into_iter().map(|record| self.store.insert(record));
        join_all(inserts).await.into_iter().filter(|ok| *ok).count()
    }

    /// Delete every cookie whose domain contains one of `domains`. Returns
    /// the number deleted.
    pub async fn clear<S: AsRef<str>>(&self, domains: &[S]) -> usize {
        let doomed: Vec<CookieRecord> = self
            .store
            .all_cookies()
            .await
            .into_iter()
            .filter(|cookie| cookie.matches_any_domain(domains))
            .collect();
        let count = doomed.len();

        join_all(doomed.into_iter().map(|cookie| self.store.delete(cookie))).await;

        tracing::info!(count, "cookies cleared");
        count
    }
}

impl fmt::Debug for CookieTransfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieTransfer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = ExportOptions::new()
            .domain("chatgpt.com")
            .domain("openai.com")
            .password("pw")
            .validity(Duration::days(30));

        assert_eq!(options.domains, vec!["chatgpt.com", "openai.com"]);
        assert_eq!(options.effective_password(), Some("pw"));
        assert_eq!(options.validity, Some(Duration::days(30)));
    }

    #[test]
    fn test_empty_password_not_effective() {
        let options = ExportOptions::new().password("");
        assert_eq!(options.effective_password(), None);
    }

    #[test]
    fn test_debug_hides_password() {
        let options = ExportOptions::new().password("supersecret");
        let debug = format!("{options:?}");
        assert!(!debug.contains("supersecret"));
        assert!(debug.contains("encrypted: true"));
    }

    #[test]
    fn test_select_filters_and_rewrites() {
        let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let cookies = vec![
            CookieRecord::new("a", "1", ".chatgpt.com"),
            CookieRecord::new("b", "2", "example.com"),
            CookieRecord::new("c", "3", "auth.openai.com")
                .expires(OffsetDateTime::from_unix_timestamp(1).ok()),
        ];

        let keep = ExportOptions::new().domains(["chatgpt.com", "openai.com"]);
        let selected = keep.select(cookies.clone(), now);
        assert_eq!(selected.len(), 2);
        assert!(selected[0].is_session());
        assert_eq!(selected[1].expires.unwrap().unix_timestamp(), 1);

        let rewritten = keep.validity(Duration::hours(1)).select(cookies, now);
        for cookie in &rewritten {
            assert_eq!(cookie.expires.unwrap().unix_timestamp(), 1_700_003_600);
        }
    }
}
