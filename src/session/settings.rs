//! User preferences.
//!
//! [`Settings`] is a plain serializable value persisted as JSON. Live
//! components hold a [`SettingsHandle`] and subscribe to changes instead of
//! reading a global.

use crate::session::scripts::ScriptSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;

/// Desktop Safari user agent, so services serve their desktop site.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15";

/// Persisted user preferences. Missing keys take their defaults.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Overrides [`DEFAULT_USER_AGENT`] when non-empty.
    pub custom_user_agent: String,
    pub allow_web_inspector: bool,
    /// Exposed to page scripts as `window.__ENABLE_DEBUG_HUD`.
    pub show_debug_hud: bool,
    pub hide_sidebar: bool,
    pub scripts: ScriptSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            custom_user_agent: String::new(),
            allow_web_inspector: false,
            show_debug_hud: false,
            hide_sidebar: true,
            scripts: ScriptSettings::default(),
        }
    }
}

impl Settings {
    /// The user agent the browser view should send.
    pub fn user_agent(&self) -> &str {
        let custom = self.custom_user_agent.trim();
        if custom.is_empty() {
            DEFAULT_USER_AGENT
        } else {
            custom
        }
    }

    /// Save settings to a file.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }

    /// Load settings from a file.
    pub fn load(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Load settings, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> io::Result<Self> {
        match Self::load(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            other => other,
        }
    }
}

/// Shared, observable settings.
///
/// Cloning is cheap and every clone sees the same value. Subscribers are
/// woken only when an update actually changes something.
#[derive(Clone, Debug)]
pub struct SettingsHandle {
    tx: Arc<watch::Sender<Settings>>,
}

impl Default for SettingsHandle {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl SettingsHandle {
    pub fn new(settings: Settings) -> Self {
        let (tx, _rx) = watch::channel(settings);
        Self { tx: Arc::new(tx) }
    }

    /// Snapshot of the current settings.
    pub fn current(&self) -> Settings {
        self.tx.borrow().clone()
    }

    /// Apply `f` to the settings. Returns whether anything changed.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut Settings),
    {
        let changed = self.tx.send_if_modified(|settings| {
            let before = settings.clone();
            f(settings);
            *settings != before
        });
        if changed {
            tracing::debug!("settings updated");
        }
        changed
    }

    /// Replace the settings wholesale.
    pub fn replace(&self, settings: Settings) -> bool {
        self.update(|current| *current = settings)
    }

    pub fn subscribe(&self) -> watch::Receiver<Settings> {
        self.tx.subscribe()
    }
}
