//! Base types and error handling.
//!
//! - [`GuardError`](guarderror::GuardError): error codes shared by the policy
//!   engine, the crypto pipeline and the export container
//! - [`context`]: helpers attaching context to `serde_json` failures

pub mod context;
pub mod guarderror;
