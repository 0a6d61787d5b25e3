use url::Url;

/// Outcome of evaluating one navigation request.
///
/// Exactly one decision is produced per request. The orchestrator must obey it:
/// load, cancel, cancel and load the service entry URL, or cancel and ask the
/// user whether to open the URL externally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Let the load proceed.
    Allow,
    /// Silently drop the navigation.
    Cancel,
    /// Drop the navigation and load the active service's entry URL.
    ForceReset,
    /// Drop the navigation and offer to open `Url` in an external application.
    PromptExternal(Url),
}

impl PolicyDecision {
    /// Whether the engine lets the navigation continue in the embedded view.
    pub fn is_allowed(&self) -> bool {
        matches!(self, PolicyDecision::Allow)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyDecision::Allow => "allow",
            PolicyDecision::Cancel => "cancel",
            PolicyDecision::ForceReset => "force_reset",
            PolicyDecision::PromptExternal(_) => "prompt_external",
        }
    }
}

/// What to do with a request to open a new window.
///
/// The embedded view never spawns windows: allowed targets load in place,
/// external ones go through the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewWindowAction {
    PromptExternal(Url),
    LoadInPlace(Url),
    Ignore,
}
