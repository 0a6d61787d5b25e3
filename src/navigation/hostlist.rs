//! Suffix-based host allow-lists.
//!
//! A host matches an entry when it equals the entry or is a dot-separated
//! subdomain of it. `accounts.chatgpt.com` matches `chatgpt.com`;
//! `evilchatgpt.com` and `evil-chatgpt.com` do not.

use std::fmt;

/// Normalize a host or entry for comparison: lowercase, no leading or
/// trailing dot.
fn normalize(host: &str) -> String {
    host.trim_start_matches('.')
        .trim_end_matches('.')
        .to_ascii_lowercase()
}

/// Check whether `host` equals `entry` or ends with `"." + entry`.
///
/// Both sides are compared case-insensitively and a trailing root dot
/// (`chatgpt.com.`) is ignored.
pub fn host_matches(host: &str, entry: &str) -> bool {
    let host = normalize(host);
    let entry = normalize(entry);

    if host.is_empty() || entry.is_empty() {
        return false;
    }
    if host == entry {
        return true;
    }

    host.len() > entry.len()
        && host.ends_with(&entry)
        && host.as_bytes()[host.len() - entry.len() - 1] == b'.'
}

/// An ordered set of allow-listed domains.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct HostList {
    entries: Vec<String>,
}

impl HostList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a domain. Duplicates and empty entries are ignored.
    pub fn insert(&mut self, domain: &str) {
        let domain = normalize(domain);
        if !domain.is_empty() && !self.entries.contains(&domain) {
            self.entries.push(domain);
        }
    }

    /// Merge every entry of `other` into this list.
    pub fn extend(&mut self, other: &HostList) {
        for entry in &other.entries {
            self.insert(entry);
        }
    }

    /// Check whether `host` matches any entry.
    pub fn matches(&self, host: &str) -> bool {
        self.entries.iter().any(|entry| host_matches(host, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for HostList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = HostList::new();
        for domain in iter {
            list.insert(domain.as_ref());
        }
        list
    }
}

impl fmt::Debug for HostList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(&self.entries).finish()
    }
}
