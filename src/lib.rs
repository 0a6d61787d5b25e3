//! # tempguard
//!
//! Keeps an embedded AI chat browser inside temporary chat mode, and moves its
//! login cookies in and out of password-protected export files.
//!
//! ## Features
//!
//! - **Navigation Policy**: per-request allow/cancel/reset/prompt decisions
//!   that force the chat back into temporary mode
//! - **Content Rules**: block lists for conversation-history resources
//! - **Cookie Export/Import**: PBKDF2-SHA256 + AES-256-GCM containers with a
//!   legacy plain-list fallback
//! - **Session Preferences**: JSON settings with change subscriptions and
//!   user-script composition
//!
//! ## Quick Start
//!
//! ```rust
//! use tempguard::navigation::{NavigationRequest, NavigationTrigger, PolicyDecision, PolicyEngine, ServiceIdentity};
//! use url::Url;
//!
//! let engine = PolicyEngine::new(ServiceIdentity::ChatGpt);
//! let link = Url::parse("https://example.com/article").unwrap();
//! let request = NavigationRequest::new(link.clone()).trigger(NavigationTrigger::LinkActivated);
//! assert_eq!(engine.decide(&request), PolicyDecision::PromptExternal(link));
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions
//! - [`navigation`] - Navigation policy engine and content rules
//! - [`cookies`] - Cookie records, export containers and transfer
//! - [`session`] - Settings and user scripts

pub mod base;
pub mod cookies;
pub mod navigation;
pub mod session;
