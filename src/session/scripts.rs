//! User-script composition.
//!
//! Page-manipulation scripts are opaque payloads. This module only decides
//! which payloads a page gets and in what order, then hands them to the
//! browser's [`ScriptSink`].

use crate::navigation::ServiceIdentity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which script slot a setting applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptScope {
    /// Injected into every service.
    Global,
    Service(ServiceIdentity),
}

/// One user-editable script slot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ScriptEntry {
    pub enabled: bool,
    /// Custom source. Blank means "use the bundled default", if any.
    pub source: String,
}

impl Default for ScriptEntry {
    fn default() -> Self {
        Self {
            enabled: true,
            source: String::new(),
        }
    }
}

/// Script preferences for all scopes.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ScriptSettings {
    pub global: ScriptEntry,
    pub chatgpt: ScriptEntry,
    pub gemini: ScriptEntry,
}

impl ScriptSettings {
    pub fn entry(&self, scope: ScriptScope) -> &ScriptEntry {
        match scope {
            ScriptScope::Global => &self.global,
            ScriptScope::Service(ServiceIdentity::ChatGpt) => &self.chatgpt,
            ScriptScope::Service(ServiceIdentity::Gemini) => &self.gemini,
        }
    }

    pub fn entry_mut(&mut self, scope: ScriptScope) -> &mut ScriptEntry {
        match scope {
            ScriptScope::Global => &mut self.global,
            ScriptScope::Service(ServiceIdentity::ChatGpt) => &mut self.chatgpt,
            ScriptScope::Service(ServiceIdentity::Gemini) => &mut self.gemini,
        }
    }

    pub fn set_enabled(&mut self, scope: ScriptScope, enabled: bool) {
        self.entry_mut(scope).enabled = enabled;
    }

    pub fn set_script(&mut self, scope: ScriptScope, source: impl Into<String>) {
        self.entry_mut(scope).source = source.into();
    }

    /// Drop the custom source so the bundled default applies again.
    pub fn reset_script(&mut self, scope: ScriptScope) {
        self.entry_mut(scope).source.clear();
    }

    /// Effective source: the custom script unless blank, then the bundled
    /// default for service scopes. The global scope has no default.
    pub fn resolved_source<'a>(&'a self, scope: ScriptScope, bundled: &'a BundledScripts) -> &'a str {
        let entry = self.entry(scope);
        if !entry.source.trim().is_empty() {
            return &entry.source;
        }
        match scope {
            ScriptScope::Global => &entry.source,
            ScriptScope::Service(service) => bundled.get(service).unwrap_or(""),
        }
    }
}

/// Default scripts shipped with the application, keyed by service.
#[derive(Debug, Clone, Default)]
pub struct BundledScripts {
    scripts: HashMap<ServiceIdentity, String>,
}

impl BundledScripts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, service: ServiceIdentity, source: impl Into<String>) -> Self {
        self.scripts.insert(service, source.into());
        self
    }

    pub fn get(&self, service: ServiceIdentity) -> Option<&str> {
        self.scripts.get(&service).map(String::as_str)
    }
}

/// When a user script runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectionTime {
    DocumentStart,
    DocumentEnd,
}

/// A script payload ready for injection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserScript {
    pub source: String,
    pub injection_time: InjectionTime,
    pub main_frame_only: bool,
}

impl UserScript {
    pub fn document_start(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            injection_time: InjectionTime::DocumentStart,
            main_frame_only: true,
        }
    }
}

/// The browser's script-injection interface.
pub trait ScriptSink {
    /// Register a script to run on every page load.
    fn add_user_script(&self, script: &UserScript);

    /// Run a script once in the current page.
    fn evaluate(&self, source: &str);
}

/// The scripts for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSet {
    /// Debug-HUD flag plus the service script. Always present.
    pub service: UserScript,
    pub global: Option<UserScript>,
}

impl ScriptSet {
    /// Compose the document-start scripts for `service`.
    pub fn compose(
        settings: &ScriptSettings,
        show_debug_hud: bool,
        service: ServiceIdentity,
        bundled: &BundledScripts,
    ) -> Self {
        let scope = ScriptScope::Service(service);
        let mut source = format!("window.__ENABLE_DEBUG_HUD = {show_debug_hud};\n");
        if settings.entry(scope).enabled {
            source.push_str(settings.resolved_source(scope, bundled));
        }

        let global = Some(&settings.global)
            .filter(|entry| entry.enabled && !entry.source.trim().is_empty())
            .map(|entry| UserScript::document_start(entry.source.clone()));

        Self {
            service: UserScript::document_start(source),
            global,
        }
    }

    /// Register every script with the sink.
    pub fn install(&self, sink: &dyn ScriptSink) {
        sink.add_user_script(&self.service);
        if let Some(global) = &self.global {
            sink.add_user_script(global);
        }
    }

    /// Re-run the service script after a load finishes; single-page apps
    /// can rebuild the DOM after document start.
    pub fn reinject(&self, sink: &dyn ScriptSink) {
        sink.evaluate(&self.service.source);
    }
}
