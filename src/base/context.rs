//! Ergonomic error context helpers.
//!
//! Provides extension traits for converting `serde_json` results into
//! context-rich `GuardError` variants.

use crate::base::guarderror::GuardError;

/// Extension trait for adding context to JSON Results.
pub trait JsonResultExt<T> {
    /// Map a decoding failure to [`GuardError::ParseError`].
    ///
    /// # Example
    /// ```ignore
    /// use tempguard::base::context::JsonResultExt;
    ///
    /// let records: Vec<CookieRecord> = serde_json::from_str(text)
    ///     .parse_context("cookie list")?;
    /// // Error: "Failed to parse cookie export: cookie list: expected value at line 1 column 1"
    /// ```
    fn parse_context(self, what: &str) -> Result<T, GuardError>;

    /// Map an encoding failure to [`GuardError::SerializationFailed`].
    fn serialize_context(self, what: &str) -> Result<T, GuardError>;
}

impl<T> JsonResultExt<T> for Result<T, serde_json::Error> {
    fn parse_context(self, what: &str) -> Result<T, GuardError> {
        self.map_err(|e| GuardError::parse_error(format!("{what}: {e}")))
    }

    fn serialize_context(self, what: &str) -> Result<T, GuardError> {
        self.map_err(|e| GuardError::serialization_failed(format!("{what}: {e}")))
    }
}
