//! Policy engine configuration.

use crate::navigation::hostlist::HostList;
use crate::navigation::service::{ServiceIdentity, ServiceRules};

/// Static configuration for a [`PolicyEngine`](super::PolicyEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyConfig {
    /// Service domains and their asset/upload subdomains.
    pub allowed_hosts: HostList,
    /// Identity providers that authentication flows redirect through.
    pub login_hosts: HostList,
    /// Schemes that may navigate at all.
    pub allowed_schemes: Vec<String>,
    /// Per-service rule sets.
    pub services: Vec<ServiceRules>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            allowed_hosts: [
                "chatgpt.com",
                "openai.com",
                "oaistatic.com",      // static assets
                "oaiusercontent.com", // uploads and generated images
                "gemini.google.com",
            ]
            .into_iter()
            .collect(),
            login_hosts: [
                "auth.openai.com",
                "login.live.com",      // Microsoft
                "accounts.google.com", // Google
                "appleid.apple.com",   // Apple
                "cdn.auth0.com",
            ]
            .into_iter()
            .collect(),
            allowed_schemes: vec!["http".to_string(), "https".to_string()],
            services: ServiceIdentity::ALL
                .into_iter()
                .map(ServiceRules::for_identity)
                .collect(),
        }
    }
}

impl PolicyConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an allowed host.
    pub fn allow_host(mut self, domain: &str) -> Self {
        self.allowed_hosts.insert(domain);
        self
    }

    /// Add a login host.
    pub fn login_host(mut self, domain: &str) -> Self {
        self.login_hosts.insert(domain);
        self
    }

    /// Replace the rules for a service, or add them if the service is new.
    pub fn service(mut self, rules: ServiceRules) -> Self {
        match self
            .services
            .iter_mut()
            .find(|existing| existing.identity == rules.identity)
        {
            Some(existing) => *existing = rules,
            None => self.services.push(rules),
        }
        self
    }

    /// Look up the rules for a service, falling back to the built-in ones.
    pub fn rules_for(&self, identity: ServiceIdentity) -> ServiceRules {
        self.services
            .iter()
            .find(|rules| rules.identity == identity)
            .cloned()
            .unwrap_or_else(|| ServiceRules::for_identity(identity))
    }

    /// Check whether `scheme` may navigate.
    pub fn allows_scheme(&self, scheme: &str) -> bool {
        self.allowed_schemes
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(scheme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PolicyConfig::default();
        assert!(config.allowed_hosts.matches("cdn.oaistatic.com"));
        assert!(config.login_hosts.matches("accounts.google.com"));
        assert!(!config.allowed_hosts.matches("google.com"));
        assert!(config.allows_scheme("https"));
        assert!(config.allows_scheme("HTTP"));
        assert!(!config.allows_scheme("javascript"));
        assert_eq!(config.services.len(), 2);
    }

    #[test]
    fn test_builder_pattern() {
        let config = PolicyConfig::new()
            .allow_host("example.org")
            .login_host("sso.corp.example");

        assert!(config.allowed_hosts.matches("www.example.org"));
        assert!(config.login_hosts.matches("sso.corp.example"));
    }

    #[test]
    fn test_service_replaces_existing() {
        let relaxed = ServiceRules::new(
            ServiceIdentity::ChatGpt,
            url::Url::parse("https://chatgpt.com/").unwrap(),
        );
        let config = PolicyConfig::new().service(relaxed.clone());

        assert_eq!(config.services.len(), 2);
        assert_eq!(config.rules_for(ServiceIdentity::ChatGpt), relaxed);
    }

    #[test]
    fn test_rules_for_falls_back() {
        let mut config = PolicyConfig::new();
        config.services.clear();
        assert_eq!(
            config.rules_for(ServiceIdentity::Gemini),
            ServiceRules::gemini()
        );
    }
}
