//! Identifier and credential newtypes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Enrollment (form/event) identifier, the `eid` of the remote API.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrollmentId(String);

impl EnrollmentId {
    /// Create a new `EnrollmentId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the enrollment ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnrollmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EnrollmentId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for EnrollmentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Opaque credential bound to a logged-in identity.
///
/// `Debug` and `Display` never print the token itself.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token for building requests.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Short form safe for logs: first four characters and the length.
    #[must_use]
    pub fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(4).collect();
        format!("{prefix}…({} chars)", self.0.chars().count())
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&self.redacted()).finish()
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.redacted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enrollment_id_round_trips_through_string() {
        let id = EnrollmentId::from("abc123");
        assert_eq!(id.as_str(), "abc123");
        assert_eq!(id.to_string(), "abc123");
    }

    #[test]
    fn access_token_never_leaks_in_debug() {
        let token = AccessToken::new("secret-token-value");
        let debug = format!("{token:?}");
        assert!(!debug.contains("secret-token-value"));
        assert!(debug.contains("secr"));
        assert_eq!(token.expose(), "secret-token-value");
    }
}
