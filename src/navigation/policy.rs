//! The navigation policy engine.
//!
//! Rules are evaluated in order and the first match wins:
//!
//! 1. Scheme not allowed → `Cancel`
//! 2. Not the main frame → `Allow`
//! 3. No host → `Cancel`
//! 4. Allow-listed host → service temporary-mode rules, else `Allow`
//! 5. Unknown host → `PromptExternal` if the user clicked, else `ForceReset`

use crate::base::guarderror::GuardError;
use crate::navigation::config::PolicyConfig;
use crate::navigation::contentrules::ContentRuleList;
use crate::navigation::decision::{NewWindowAction, PolicyDecision};
use crate::navigation::hostlist::HostList;
use crate::navigation::request::{NavigationRequest, NavigationTrigger};
use crate::navigation::service::{ServiceIdentity, ServiceRules};
use url::Url;

/// Classifies navigations for one session.
///
/// Holds no state beyond configuration and is safe to share between threads.
#[derive(Debug, Clone)]
pub struct PolicyEngine {
    service: ServiceIdentity,
    config: PolicyConfig,
    rules: ServiceRules,
    // allowed ∪ login ∪ home domains of the active service
    permitted: HostList,
}

impl PolicyEngine {
    /// Create an engine with the default configuration.
    pub fn new(service: ServiceIdentity) -> Self {
        Self::with_config(service, PolicyConfig::default())
    }

    pub fn with_config(service: ServiceIdentity, config: PolicyConfig) -> Self {
        let rules = config.rules_for(service);
        let permitted = Self::permitted_hosts(&config, &rules);
        Self {
            service,
            config,
            rules,
            permitted,
        }
    }

    /// Replace the configuration. The service identity is fixed for the
    /// lifetime of the engine.
    pub fn set_config(&mut self, config: PolicyConfig) {
        self.rules = config.rules_for(self.service);
        self.permitted = Self::permitted_hosts(&config, &self.rules);
        self.config = config;
    }

    fn permitted_hosts(config: &PolicyConfig, rules: &ServiceRules) -> HostList {
        let mut hosts = config.allowed_hosts.clone();
        hosts.extend(&config.login_hosts);
        hosts.extend(&rules.home_domains);
        hosts
    }

    pub fn service(&self) -> ServiceIdentity {
        self.service
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Canonical entry URL of the active service.
    pub fn entry_url(&self) -> &Url {
        &self.rules.entry_url
    }

    /// Decide what to do with a navigation.
    pub fn decide(&self, request: &NavigationRequest) -> PolicyDecision {
        let decision = self.evaluate(request);
        tracing::debug!(
            service = %self.service,
            host = request.url.host_str().unwrap_or(""),
            path = request.url.path(),
            main_frame = request.is_main_frame,
            user_initiated = request.user_initiated,
            decision = decision.as_str(),
            "navigation policy decision"
        );
        decision
    }

    fn evaluate(&self, request: &NavigationRequest) -> PolicyDecision {
        let url = &request.url;

        if !self.config.allows_scheme(url.scheme()) {
            return PolicyDecision::Cancel;
        }

        // Sub-resources and nested frames must load or the page breaks.
        if !request.is_main_frame {
            return PolicyDecision::Allow;
        }

        let Some(host) = url.host_str() else {
            return PolicyDecision::Cancel;
        };

        if self.permitted.matches(host) {
            if self.rules.owns_host(host) {
                if self.rules.is_passthrough(url.path()) {
                    return PolicyDecision::Allow;
                }
                if self.rules.is_leaving_temporary_mode(url) {
                    return PolicyDecision::ForceReset;
                }
            }
            return PolicyDecision::Allow;
        }

        if request.user_initiated {
            PolicyDecision::PromptExternal(url.clone())
        } else {
            // Unsolicited third-party redirects are reverted, not surfaced.
            PolicyDecision::ForceReset
        }
    }

    /// Decide for a raw URL string; anything unparseable is cancelled.
    pub fn decide_raw(
        &self,
        raw: &str,
        is_main_frame: bool,
        trigger: NavigationTrigger,
    ) -> PolicyDecision {
        match Url::parse(raw) {
            Ok(url) => self.decide(
                &NavigationRequest::new(url)
                    .main_frame(is_main_frame)
                    .trigger(trigger),
            ),
            Err(e) => {
                tracing::debug!(error = %e, "cancelling unparseable navigation");
                PolicyDecision::Cancel
            }
        }
    }

    /// Parse a URL typed or pasted by the user before navigating to it.
    ///
    /// Rejects what `decide` would cancel outright: unparseable input, a
    /// scheme outside the allow-list, and a URL without a host.
    pub fn validate_url(&self, raw: &str) -> Result<Url, GuardError> {
        let url = Url::parse(raw.trim())?;
        if !self.config.allows_scheme(url.scheme()) {
            return Err(GuardError::UnsupportedScheme);
        }
        if url.host_str().is_none() {
            return Err(GuardError::MissingHost);
        }
        Ok(url)
    }

    /// True iff the URL has a host that matches no allow-list entry.
    pub fn is_external_domain(&self, url: &Url) -> bool {
        match url.host_str() {
            Some(host) => !self.permitted.matches(host),
            None => false,
        }
    }

    /// True if the URL is on the active service's own domain.
    pub fn is_service_host(&self, url: &Url) -> bool {
        url.host_str()
            .is_some_and(|host| self.rules.owns_host(host))
    }

    /// Evaluate a URL change observed without a navigation event (SPA routing).
    ///
    /// External URLs are ignored. Otherwise returns `Some(ForceReset)` when the
    /// new route leaves temporary mode, `None` when nothing needs to happen.
    pub fn decide_route_change(&self, url: &Url) -> Option<PolicyDecision> {
        if self.is_external_domain(url) {
            return None;
        }

        match self.decide(&NavigationRequest::new(url.clone())) {
            PolicyDecision::ForceReset => Some(PolicyDecision::ForceReset),
            _ => None,
        }
    }

    /// Map a request to open a new window onto an in-place action.
    pub fn decide_new_window(&self, url: &Url, trigger: NavigationTrigger) -> NewWindowAction {
        let request = NavigationRequest::new(url.clone())
            .trigger(trigger)
            .user_initiated(true);

        match self.decide(&request) {
            PolicyDecision::PromptExternal(target) => NewWindowAction::PromptExternal(target),
            PolicyDecision::Allow => NewWindowAction::LoadInPlace(url.clone()),
            PolicyDecision::ForceReset => NewWindowAction::LoadInPlace(self.entry_url().clone()),
            PolicyDecision::Cancel => NewWindowAction::Ignore,
        }
    }

    /// Content-blocker rules for the active service.
    pub fn content_rules(&self) -> ContentRuleList {
        ContentRuleList::blocking(self.rules.blocked_resources.iter().cloned())
    }
}
