//! Session management for authenticated users.
//!
//! Sessions represent an authenticated user's active connection to the
//! platform. They are created after a successful WeChat login and are
//! used to track the user's identity for the rest of their visit.

use brushnote_core::UserId;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a session.
///
/// Session IDs are opaque strings generated during session creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a new session ID from a string.
    #[must_use]
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the session ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Represents an active authenticated session.
///
/// A session is created after a successful WeChat code exchange. Sessions
/// have an expiration time and can be explicitly invalidated. The WeChat
/// access/refresh tokens are kept with the session so later calls against
/// the WeChat API can be made on the user's behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session.
    id: SessionId,
    /// The authenticated user's ID.
    user_id: UserId,
    /// When the session was created.
    created_at: DateTime<Utc>,
    /// When the session expires.
    expires_at: DateTime<Utc>,
    /// WeChat access token from the code exchange.
    access_token: Option<String>,
    /// WeChat refresh token from the code exchange.
    refresh_token: Option<String>,
}

impl Session {
    /// Creates a new session for the given user.
    ///
    /// The session is valid for the specified duration.
    #[must_use]
    pub fn new(id: SessionId, user_id: UserId, duration: Duration) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            created_at: now,
            expires_at: now + duration,
            access_token: None,
            refresh_token: None,
        }
    }

    /// Creates a session carrying WeChat tokens.
    #[must_use]
    pub fn with_tokens(
        id: SessionId,
        user_id: UserId,
        duration: Duration,
        access_token: String,
        refresh_token: Option<String>,
    ) -> Self {
        let mut session = Self::new(id, user_id, duration);
        session.access_token = Some(access_token);
        session.refresh_token = refresh_token;
        session
    }

    /// Reconstitutes a session from storage.
    ///
    /// Timestamps are taken as-is so a stored session's validity window
    /// is not shifted by the read.
    #[must_use]
    pub fn from_storage(
        id: SessionId,
        user_id: UserId,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        access_token: Option<String>,
        refresh_token: Option<String>,
    ) -> Self {
        Self {
            id,
            user_id,
            created_at,
            expires_at,
            access_token,
            refresh_token,
        }
    }

    /// Returns the session ID.
    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the authenticated user's ID.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns when the session was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the session expires.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns the WeChat access token, if present.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Returns the WeChat refresh token, if present.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Returns true if the session has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Returns true if the session is still valid (not expired).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.is_expired()
    }

    /// Updates the session tokens and extends expiration.
    pub fn refresh(
        &mut self,
        access_token: String,
        refresh_token: Option<String>,
        duration: Duration,
    ) {
        self.access_token = Some(access_token);
        self.refresh_token = refresh_token;
        self.expires_at = Utc::now() + duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session_id() -> SessionId {
        SessionId::new("sess_test_123".to_string())
    }

    #[test]
    fn session_id_display() {
        let id = test_session_id();
        assert_eq!(id.to_string(), "sess_test_123");
    }

    #[test]
    fn session_id_from_string() {
        let id: SessionId = "test_session".to_string().into();
        assert_eq!(id.as_str(), "test_session");
    }

    #[test]
    fn new_session_has_correct_fields() {
        let session_id = test_session_id();
        let user_id = UserId::new();
        let duration = Duration::minutes(30);

        let before = Utc::now();
        let session = Session::new(session_id.clone(), user_id, duration);
        let after = Utc::now();

        assert_eq!(session.id(), &session_id);
        assert_eq!(session.user_id(), user_id);
        assert!(session.created_at() >= before);
        assert!(session.created_at() <= after);
        assert!(session.expires_at() > session.created_at());
        assert!(session.access_token().is_none());
        assert!(session.refresh_token().is_none());
    }

    #[test]
    fn session_with_tokens() {
        let session = Session::with_tokens(
            test_session_id(),
            UserId::new(),
            Duration::minutes(30),
            "access_token_123".to_string(),
            Some("refresh_token_456".to_string()),
        );

        assert_eq!(session.access_token(), Some("access_token_123"));
        assert_eq!(session.refresh_token(), Some("refresh_token_456"));
    }

    #[test]
    fn session_expiration() {
        // Create a session that expires immediately
        let session = Session::new(
            test_session_id(),
            UserId::new(),
            Duration::seconds(-1), // Already expired
        );

        assert!(session.is_expired());
        assert!(!session.is_valid());
    }

    #[test]
    fn session_not_expired() {
        let session = Session::new(test_session_id(), UserId::new(), Duration::minutes(30));

        assert!(!session.is_expired());
        assert!(session.is_valid());
    }

    #[test]
    fn session_refresh() {
        let mut session = Session::new(test_session_id(), UserId::new(), Duration::seconds(1));

        let old_expires = session.expires_at();

        // Wait briefly and refresh
        std::thread::sleep(std::time::Duration::from_millis(10));
        session.refresh(
            "new_access_token".to_string(),
            Some("new_refresh_token".to_string()),
            Duration::minutes(60),
        );

        assert_eq!(session.access_token(), Some("new_access_token"));
        assert_eq!(session.refresh_token(), Some("new_refresh_token"));
        assert!(session.expires_at() > old_expires);
    }

    #[test]
    fn from_storage_preserves_timestamps() {
        let created = Utc::now() - Duration::minutes(20);
        let expires = created + Duration::minutes(30);

        let session = Session::from_storage(
            test_session_id(),
            UserId::new(),
            created,
            expires,
            Some("token".to_string()),
            None,
        );

        assert_eq!(session.created_at(), created);
        assert_eq!(session.expires_at(), expires);
        assert!(session.is_valid());
    }

    #[test]
    fn session_serialization_roundtrip() {
        let session = Session::with_tokens(
            test_session_id(),
            UserId::new(),
            Duration::minutes(30),
            "token".to_string(),
            None,
        );

        let json = serde_json::to_string(&session).expect("serialize");
        let parsed: Session = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(session.id(), parsed.id());
        assert_eq!(session.user_id(), parsed.user_id());
    }
}
