//! Cookie export, import and clearing.
//!
//! Cookies leave the browser as an [`ExportContainer`]: a JSON envelope that
//! either carries the cookie list directly or encrypts it with a password.
//!
//! | Type | Responsibility |
//! |------|----------------|
//! | [`CookieRecord`] | Portable cookie representation |
//! | [`cookiecrypto`] | PBKDF2-SHA256 key derivation and AES-256-GCM |
//! | [`ExportContainer`] | Wire format, legacy fallback |
//! | [`CookieStore`] | Browser cookie store hook |
//! | [`MemoryCookieStore`] | In-memory store |
//! | [`CookieTransfer`] | Export, import and clear against a store |
//!
//! # Export and re-import
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tempguard::cookies::{CookieTransfer, ExportOptions, MemoryCookieStore};
//!
//! # async fn run() -> Result<(), tempguard::base::guarderror::GuardError> {
//! let transfer = CookieTransfer::new(Arc::new(MemoryCookieStore::new()));
//! let options = ExportOptions::new()
//!     .domains(["chatgpt.com", "openai.com"])
//!     .password("hunter2");
//!
//! let json = transfer.export(&options).await?;
//! let imported = transfer.import(&json, Some("hunter2")).await?;
//! println!("imported {imported} cookies");
//! # Ok(())
//! # }
//! ```
//!
//! # Encrypted layout
//!
//! `data` decodes to `nonce(12) ‖ ciphertext ‖ tag(16)`; `salt` decodes to
//! 32 random bytes. The key is PBKDF2-HMAC-SHA256 with 10,000 iterations.

pub mod container;
pub mod cookiecrypto;
pub mod memorystore;
pub mod record;
pub mod store;
pub mod transfer;

pub use container::ExportContainer;
pub use memorystore::MemoryCookieStore;
pub use record::CookieRecord;
pub use store::{CookieStore, StoreFuture};
pub use transfer::{CookieTransfer, ExportOptions};
