//! Chat service definitions.
//!
//! Each [`ServiceIdentity`] is paired with a [`ServiceRules`] value that holds
//! everything service-specific the policy engine needs: the canonical entry
//! URL, the domains the service owns and the heuristics that detect a
//! navigation leaving temporary mode. Adding a service means adding data here,
//! not code to the engine.

use crate::navigation::hostlist::HostList;
use std::fmt;
use url::Url;

const CHATGPT_ENTRY: &str = "https://chatgpt.com/?temporary-chat=true";
const GEMINI_ENTRY: &str = "https://gemini.google.com/app";

// =============================================================================
// Service Identity
// =============================================================================

/// Which chat backend a session targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ServiceIdentity {
    /// ChatGPT, locked to `?temporary-chat=true`.
    #[default]
    ChatGpt,
    /// Gemini.
    Gemini,
}

impl ServiceIdentity {
    /// All known services, in menu order.
    pub const ALL: [ServiceIdentity; 2] = [ServiceIdentity::ChatGpt, ServiceIdentity::Gemini];

    /// Human-readable service name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceIdentity::ChatGpt => "ChatGPT",
            ServiceIdentity::Gemini => "Gemini",
        }
    }
}

impl fmt::Display for ServiceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// =============================================================================
// Service Rules
// =============================================================================

/// A `key=value` query pair that must be present on the service's home path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryMarker {
    pub key: String,
    pub value: String,
}

impl QueryMarker {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Check whether the URL's query carries this exact pair.
    pub fn is_present(&self, url: &Url) -> bool {
        url.query_pairs()
            .any(|(k, v)| k == self.key.as_str() && v == self.value.as_str())
    }
}

/// Service-specific navigation rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRules {
    /// Service these rules belong to.
    pub identity: ServiceIdentity,
    /// Canonical entry URL; `ForceReset` navigates here.
    pub entry_url: Url,
    /// Domains owned by the service. Temporary-mode rules apply only here.
    pub home_domains: HostList,
    /// Path prefixes that are always allowed (auth callbacks, API).
    pub passthrough_prefixes: Vec<String>,
    /// Path prefixes of persistent-history views.
    pub history_prefixes: Vec<String>,
    /// Query pair marking the home path as temporary, if the service has one.
    pub temporary_marker: Option<QueryMarker>,
    /// URL filters for resources that must never load (history APIs).
    pub blocked_resources: Vec<String>,
}

impl ServiceRules {
    /// Rules that allow every same-domain navigation.
    pub fn new(identity: ServiceIdentity, entry_url: Url) -> Self {
        let home_domains = entry_url.host_str().into_iter().collect();
        Self {
            identity,
            entry_url,
            home_domains,
            passthrough_prefixes: Vec::new(),
            history_prefixes: Vec::new(),
            temporary_marker: None,
            blocked_resources: Vec::new(),
        }
    }

    /// Built-in rules for a known service.
    pub fn for_identity(identity: ServiceIdentity) -> Self {
        match identity {
            ServiceIdentity::ChatGpt => Self::chatgpt(),
            ServiceIdentity::Gemini => Self::gemini(),
        }
    }

    /// ChatGPT: the home page must carry `temporary-chat=true`, and the
    /// library, saved conversations and shared links all persist history.
    pub fn chatgpt() -> Self {
        let entry = Url::parse(CHATGPT_ENTRY).expect("static entry URL is valid");
        Self::new(ServiceIdentity::ChatGpt, entry)
            .passthrough_prefix("/auth/")
            .passthrough_prefix("/api/")
            .history_prefix("/library")
            .history_prefix("/c/")
            .history_prefix("/share/")
            .temporary_marker(QueryMarker::new("temporary-chat", "true"))
            .blocked_resource("https://chatgpt.com/backend-api/conversations")
            .blocked_resource("https://chatgpt.com/backend-api/conversation")
    }

    /// Gemini has no persistence surface to guard; same-domain navigation is free.
    pub fn gemini() -> Self {
        let entry = Url::parse(GEMINI_ENTRY).expect("static entry URL is valid");
        Self::new(ServiceIdentity::Gemini, entry)
    }

    /// Add an owned domain.
    pub fn home_domain(mut self, domain: &str) -> Self {
        self.home_domains.insert(domain);
        self
    }

    /// Add an always-allowed path prefix.
    pub fn passthrough_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.passthrough_prefixes.push(prefix.into());
        self
    }

    /// Add a persistent-history path prefix.
    pub fn history_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.history_prefixes.push(prefix.into());
        self
    }

    /// Set the temporary-mode query marker.
    pub fn temporary_marker(mut self, marker: QueryMarker) -> Self {
        self.temporary_marker = Some(marker);
        self
    }

    /// Add a blocked resource URL filter.
    pub fn blocked_resource(mut self, filter: impl Into<String>) -> Self {
        self.blocked_resources.push(filter.into());
        self
    }

    /// Check whether `host` belongs to this service.
    pub fn owns_host(&self, host: &str) -> bool {
        self.home_domains.matches(host)
    }

    /// Check whether the path is exempt from temporary-mode checks.
    pub fn is_passthrough(&self, path: &str) -> bool {
        self.passthrough_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// Check whether a same-domain URL would leave temporary mode.
    ///
    /// True for persistent-history paths, and for the bare home path when the
    /// service requires a temporary marker that the query lacks.
    pub fn is_leaving_temporary_mode(&self, url: &Url) -> bool {
        let path = url.path();

        if self
            .history_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
        {
            return true;
        }

        if path.is_empty() || path == "/" {
            if let Some(marker) = &self.temporary_marker {
                return !marker.is_present(url);
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_display_names() {
        assert_eq!(ServiceIdentity::ChatGpt.to_string(), "ChatGPT");
        assert_eq!(ServiceIdentity::Gemini.to_string(), "Gemini");
        assert_eq!(ServiceIdentity::default(), ServiceIdentity::ChatGpt);
    }

    #[test]
    fn test_entry_urls() {
        let chatgpt = ServiceRules::for_identity(ServiceIdentity::ChatGpt);
        assert_eq!(
            chatgpt.entry_url.as_str(),
            "https://chatgpt.com/?temporary-chat=true"
        );
        let gemini = ServiceRules::for_identity(ServiceIdentity::Gemini);
        assert_eq!(gemini.entry_url.as_str(), "https://gemini.google.com/app");
    }

    #[test]
    fn test_home_domain_from_entry() {
        let rules = ServiceRules::chatgpt();
        assert!(rules.owns_host("chatgpt.com"));
        assert!(rules.owns_host("ab.chatgpt.com"));
        assert!(!rules.owns_host("openai.com"));
    }

    #[test]
    fn test_marker_requires_exact_pair() {
        let marker = QueryMarker::new("temporary-chat", "true");
        assert!(marker.is_present(&url("https://chatgpt.com/?temporary-chat=true")));
        assert!(marker.is_present(&url("https://chatgpt.com/?a=1&temporary-chat=true")));
        assert!(!marker.is_present(&url("https://chatgpt.com/?temporary-chat=false")));
        assert!(!marker.is_present(&url("https://chatgpt.com/?xtemporary-chat=true")));
        assert!(!marker.is_present(&url("https://chatgpt.com/")));
    }

    #[test]
    fn test_chatgpt_leaving_temporary_mode() {
        let rules = ServiceRules::chatgpt();
        assert!(rules.is_leaving_temporary_mode(&url("https://chatgpt.com/")));
        assert!(rules.is_leaving_temporary_mode(&url("https://chatgpt.com/c/abc123")));
        assert!(rules.is_leaving_temporary_mode(&url(
            "https://chatgpt.com/c/abc123?temporary-chat=true"
        )));
        assert!(rules.is_leaving_temporary_mode(&url("https://chatgpt.com/share/xyz")));
        assert!(rules.is_leaving_temporary_mode(&url("https://chatgpt.com/library")));
        assert!(!rules.is_leaving_temporary_mode(&url(
            "https://chatgpt.com/?temporary-chat=true"
        )));
        assert!(!rules.is_leaving_temporary_mode(&url("https://chatgpt.com/gpts")));
    }

    #[test]
    fn test_gemini_never_leaves() {
        let rules = ServiceRules::gemini();
        assert!(!rules.is_leaving_temporary_mode(&url("https://gemini.google.com/")));
        assert!(!rules.is_leaving_temporary_mode(&url("https://gemini.google.com/app/123")));
    }

    #[test]
    fn test_passthrough() {
        let rules = ServiceRules::chatgpt();
        assert!(rules.is_passthrough("/auth/callback"));
        assert!(rules.is_passthrough("/api/auth/session"));
        assert!(!rules.is_passthrough("/c/123"));
    }
}
