use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// One browser cookie as exchanged with the cookie store and the export file.
///
/// Field names on the wire are `name`, `value`, `domain`, `path`, `isSecure`,
/// `isHTTPOnly` and `expires` (Unix seconds, `null` for session cookies).
/// Fractional `expires` values are accepted on input; output is always whole
/// seconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    pub is_secure: bool,
    #[serde(rename = "isHTTPOnly")]
    pub is_http_only: bool,
    #[serde(default, with = "unix_seconds")]
    pub expires: Option<OffsetDateTime>,
}

impl CookieRecord {
    /// A session cookie on path `/` with no flags set.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: domain.into(),
            path: "/".to_string(),
            is_secure: false,
            is_http_only: false,
            expires: None,
        }
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.is_secure = secure;
        self
    }

    pub fn http_only(mut self, http_only: bool) -> Self {
        self.is_http_only = http_only;
        self
    }

    pub fn expires(mut self, expires: Option<OffsetDateTime>) -> Self {
        self.expires = expires;
        self
    }

    /// Session cookies have no expiry and are never expired.
    pub fn is_session(&self) -> bool {
        self.expires.is_none()
    }

    pub fn is_expired(&self, current_time: OffsetDateTime) -> bool {
        self.expires.is_some_and(|expiry| expiry < current_time)
    }

    /// Substring match against a list of domain suffixes.
    ///
    /// `.chatgpt.com` and `auth.chatgpt.com` both match `chatgpt.com`.
    pub fn matches_any_domain<S: AsRef<str>>(&self, suffixes: &[S]) -> bool {
        suffixes
            .iter()
            .any(|suffix| self.domain.contains(suffix.as_ref()))
    }

    /// Check the fields a cookie store needs to accept the record.
    ///
    /// Rejects an empty name or domain, a name containing `=`, `;` or
    /// whitespace, a value containing `;`, and a path not starting with `/`.
    pub fn is_well_formed(&self) -> bool {
        !self.name.is_empty()
            && !self.domain.is_empty()
            && !self
                .name
                .chars()
                .any(|c| c == '=' || c == ';' || c.is_whitespace() || c.is_control())
            && !self.value.chars().any(|c| c == ';' || c.is_control())
            && self.path.starts_with('/')
    }

    /// Rewrite the expiry to `now + validity`, truncated to whole seconds so
    /// it survives the export format unchanged.
    pub fn with_validity(mut self, now: OffsetDateTime, validity: Duration) -> Self {
        self.expires = OffsetDateTime::from_unix_timestamp((now + validity).unix_timestamp()).ok();
        self
    }
}

/// `Option<OffsetDateTime>` as Unix seconds: integer out, integer or float in.
mod unix_seconds {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use time::OffsetDateTime;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Timestamp {
        Whole(i64),
        Fractional(f64),
    }

    pub fn serialize<S: Serializer>(
        value: &Option<OffsetDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => serializer.serialize_some(&time.unix_timestamp()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<OffsetDateTime>, D::Error> {
        let nanos = match Option::<Timestamp>::deserialize(deserializer)? {
            None => return Ok(None),
            Some(Timestamp::Whole(secs)) => i128::from(secs) * 1_000_000_000,
            Some(Timestamp::Fractional(secs)) if secs.abs() < i64::MAX as f64 => {
                // Split first so the fraction keeps its precision.
                (secs.trunc() as i128) * 1_000_000_000 + (secs.fract() * 1e9).round() as i128
            }
            Some(Timestamp::Fractional(secs)) => {
                return Err(de::Error::custom(format!("invalid timestamp: {secs}")));
            }
        };

        OffsetDateTime::from_unix_timestamp_nanos(nanos)
            .map(Some)
            .map_err(de::Error::custom)
    }
}
