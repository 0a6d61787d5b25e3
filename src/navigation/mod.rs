//! Navigation policy for a sandboxed temporary-chat session.
//!
//! Every navigation the embedded browser attempts is classified by
//! [`PolicyEngine`] into exactly one [`PolicyDecision`]. The engine is the
//! whole privacy guarantee of the session: a page may load freely from the
//! service and its identity providers, may never drift into a persistent
//! history view, and may never leave for a third-party site without the user
//! agreeing to open it externally.
//!
//! # Example
//!
//! ```rust
//! use tempguard::navigation::{
//!     NavigationRequest, NavigationTrigger, PolicyDecision, PolicyEngine, ServiceIdentity,
//! };
//! use url::Url;
//!
//! let engine = PolicyEngine::new(ServiceIdentity::ChatGpt);
//!
//! let request = NavigationRequest::new(Url::parse("https://chatgpt.com/c/abc").unwrap())
//!     .trigger(NavigationTrigger::LinkActivated);
//! assert_eq!(engine.decide(&request), PolicyDecision::ForceReset);
//! ```
//!
//! # Orchestrator hooks
//!
//! | Browser event | Engine call |
//! |---------------|-------------|
//! | decide-policy-for-navigation | [`PolicyEngine::decide`] |
//! | URL changed (SPA routing) | [`PolicyEngine::decide_route_change`] |
//! | open new window | [`PolicyEngine::decide_new_window`] |
//! | view configured | [`PolicyEngine::content_rules`] |

pub mod config;
pub mod contentrules;
pub mod decision;
pub mod hostlist;
pub mod policy;
pub mod request;
pub mod service;

pub use config::PolicyConfig;
pub use contentrules::{ContentRule, ContentRuleList};
pub use decision::{NewWindowAction, PolicyDecision};
pub use hostlist::{host_matches, HostList};
pub use policy::PolicyEngine;
pub use request::{NavigationRequest, NavigationTrigger};
pub use service::{QueryMarker, ServiceIdentity, ServiceRules};
