//! Session preferences and page scripts.
//!
//! | Type | Responsibility |
//! |------|----------------|
//! | [`Settings`] | Persisted preferences |
//! | [`SettingsHandle`] | Shared settings with change notification |
//! | [`ScriptSet`] | Document-start scripts for one service |
//! | [`ScriptSink`] | Browser script-injection hook |

pub mod scripts;
pub mod settings;

pub use scripts::{
    BundledScripts, InjectionTime, ScriptEntry, ScriptScope, ScriptSet, ScriptSettings, ScriptSink,
    UserScript,
};
pub use settings::{Settings, SettingsHandle, DEFAULT_USER_AGENT};
