use thiserror::Error;

/// Every failure the crate can report.
///
/// Codes are grouped by subsystem: navigation input in the -100 range,
/// cryptography in the -200 range and the export container in the -300
/// range. Navigation decisions never fail; the navigation variants come
/// from [`PolicyEngine::validate_url`].
///
/// [`PolicyEngine::validate_url`]: crate::navigation::PolicyEngine::validate_url
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GuardError {
    // Navigation input
    #[error("URL scheme is not allowed")]
    UnsupportedScheme,
    #[error("URL has no host")]
    MissingHost,
    #[error("Invalid URL")]
    InvalidUrl,

    // Cryptography
    #[error("Encryption failed")]
    EncryptionFailed,
    /// Covers both a wrong password and tampered ciphertext.
    #[error("Invalid password or corrupted data")]
    InvalidPassword,

    // Export container
    #[error("Password required for encrypted cookie export")]
    PasswordRequired,
    #[error("Corrupted encrypted data")]
    CorruptedData,
    #[error("Failed to parse cookie export: {message}")]
    ParseError { message: String },
    #[error("Failed to serialize cookie export: {message}")]
    SerializationFailed { message: String },

    #[error("Unknown error: {0}")]
    Unknown(i32),
}

impl GuardError {
    /// Create a parse error.
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    pub fn serialization_failed(message: impl Into<String>) -> Self {
        Self::SerializationFailed {
            message: message.into(),
        }
    }

    /// Whether the caller can recover by asking the user for a (different) password.
    pub fn is_password_error(&self) -> bool {
        matches!(self, Self::InvalidPassword | Self::PasswordRequired)
    }

    pub fn as_i32(&self) -> i32 {
        match self {
            GuardError::UnsupportedScheme => -100,
            GuardError::MissingHost => -101,
            GuardError::InvalidUrl => -102,

            GuardError::EncryptionFailed => -200,
            GuardError::InvalidPassword => -201,

            GuardError::PasswordRequired => -300,
            GuardError::CorruptedData => -301,
            GuardError::ParseError { .. } => -302,
            GuardError::SerializationFailed { .. } => -303,

            GuardError::Unknown(code) => *code,
        }
    }
}

impl From<i32> for GuardError {
    /// Codes carrying a message come back with an empty one.
    fn from(code: i32) -> Self {
        match code {
            -100 => GuardError::UnsupportedScheme,
            -101 => GuardError::MissingHost,
            -102 => GuardError::InvalidUrl,

            -200 => GuardError::EncryptionFailed,
            -201 => GuardError::InvalidPassword,

            -300 => GuardError::PasswordRequired,
            -301 => GuardError::CorruptedData,
            -302 => GuardError::parse_error(""),
            -303 => GuardError::serialization_failed(""),
            _ => GuardError::Unknown(code),
        }
    }
}

impl From<url::ParseError> for GuardError {
    fn from(_: url::ParseError) -> Self {
        GuardError::InvalidUrl
    }
}
