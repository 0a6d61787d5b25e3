//! The cookie export container.
//!
//! ```json
//! {
//!   "isEncrypted": true,
//!   "data": "<base64(nonce ‖ ciphertext ‖ tag)>",
//!   "salt": "<base64(salt)>"
//! }
//! ```
//!
//! Unencrypted containers carry the pretty-printed cookie list directly in
//! `data` and `"salt": null`. Files written before the container existed are
//! a bare JSON array of cookie records; [`ExportContainer::parse`] accepts
//! those as unencrypted containers.

use crate::base::context::JsonResultExt;
use crate::base::guarderror::GuardError;
use crate::cookies::cookiecrypto;
use crate::cookies::record::CookieRecord;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Versioned envelope around an exported cookie list.
///
/// Every container built by this crate has `salt` set iff `is_encrypted`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportContainer {
    pub is_encrypted: bool,
    pub data: String,
    pub salt: Option<String>,
}

impl ExportContainer {
    /// Build an unencrypted container.
    pub fn plain(records: &[CookieRecord]) -> Result<Self, GuardError> {
        let data = serde_json::to_string_pretty(records).serialize_context("cookie list")?;
        Ok(Self {
            is_encrypted: false,
            data,
            salt: None,
        })
    }

    /// Build an encrypted container. Runs key derivation; call from a
    /// blocking context.
    pub fn encrypted(records: &[CookieRecord], password: &str) -> Result<Self, GuardError> {
        let raw = serde_json::to_vec_pretty(records).serialize_context("cookie list")?;
        let sealed = cookiecrypto::encrypt(&raw, password)?;
        Ok(Self {
            is_encrypted: true,
            data: STANDARD.encode(&sealed.bundle),
            salt: Some(STANDARD.encode(&sealed.salt)),
        })
    }

    /// Encrypt when a non-empty password is given, otherwise build a plain
    /// container.
    pub fn seal(records: &[CookieRecord], password: Option<&str>) -> Result<Self, GuardError> {
        match password.filter(|p| !p.is_empty()) {
            Some(password) => Self::encrypted(records, password),
            None => Self::plain(records),
        }
    }

    /// Parse a container, falling back to the legacy bare-list format.
    pub fn parse(text: &str) -> Result<Self, GuardError> {
        let container_err = match serde_json::from_str::<ExportContainer>(text) {
            Ok(container) => return Ok(container),
            Err(e) => e,
        };

        if serde_json::from_str::<Vec<CookieRecord>>(text).is_ok() {
            tracing::debug!("parsed legacy cookie list without container");
            return Ok(Self {
                is_encrypted: false,
                data: text.to_string(),
                salt: None,
            });
        }

        Err(container_err).parse_context("cookie export")
    }

    /// Recover the cookie list. Runs key derivation for encrypted
    /// containers; call from a blocking context.
    pub fn open(&self, password: Option<&str>) -> Result<Vec<CookieRecord>, GuardError> {
        if !self.is_encrypted {
            return serde_json::from_str(&self.data).parse_context("cookie list");
        }

        let password = password
            .filter(|p| !p.is_empty())
            .ok_or(GuardError::PasswordRequired)?;

        let salt = self
            .salt
            .as_deref()
            .and_then(|s| STANDARD.decode(s).ok())
            .ok_or(GuardError::CorruptedData)?;
        let bundle = STANDARD
            .decode(&self.data)
            .map_err(|_| GuardError::CorruptedData)?;

        let plaintext = cookiecrypto::decrypt(&bundle, password, &salt)?;
        serde_json::from_slice(&plaintext).parse_context("decrypted cookie list")
    }

    /// Encode for file storage.
    pub fn to_json(&self) -> Result<String, GuardError> {
        serde_json::to_string_pretty(self).serialize_context("cookie export")
    }
}
