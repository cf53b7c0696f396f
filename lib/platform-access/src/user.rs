//! User domain type and related structures.
//!
//! The User represents an authenticated user of the platform.
//! Users are identified by their WeChat openid and have a
//! corresponding internal UserId.

use brushnote_core::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents an authenticated user of the platform.
///
/// Users are created after their first successful WeChat login and are
/// identified by their WeChat openid (unique per application). The
/// internal `id` is used for all platform operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Internal platform user ID.
    id: UserId,
    /// WeChat openid - unique identifier for this user under our application.
    wechat_open_id: String,
    /// WeChat unionid - unique identifier across all applications of the
    /// same WeChat open-platform account, if the account has one.
    wechat_union_id: Option<String>,
    /// Display nickname.
    nickname: Option<String>,
    /// When the user record was created.
    created_at: DateTime<Utc>,
    /// When the user record was last updated.
    updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user for the given WeChat openid.
    ///
    /// The user ID is generated automatically. Use this when creating
    /// a new user after their first WeChat login.
    #[must_use]
    pub fn new(wechat_open_id: String) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            wechat_open_id,
            wechat_union_id: None,
            nickname: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a user with all fields specified.
    ///
    /// Use this when reconstituting a user from storage.
    #[must_use]
    pub fn with_all_fields(
        id: UserId,
        wechat_open_id: String,
        wechat_union_id: Option<String>,
        nickname: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            wechat_open_id,
            wechat_union_id,
            nickname,
            created_at,
            updated_at,
        }
    }

    /// Returns the user's internal platform ID.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the WeChat openid.
    #[must_use]
    pub fn wechat_open_id(&self) -> &str {
        &self.wechat_open_id
    }

    /// Returns the WeChat unionid, if the account has one.
    #[must_use]
    pub fn wechat_union_id(&self) -> Option<&str> {
        self.wechat_union_id.as_deref()
    }

    /// Returns the user's nickname, if set.
    #[must_use]
    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }

    /// Returns when the user was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the user was last updated.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Sets the WeChat unionid.
    pub fn set_wechat_union_id(&mut self, union_id: Option<String>) {
        self.wechat_union_id = union_id;
        self.updated_at = Utc::now();
    }

    /// Sets the user's nickname.
    pub fn set_nickname(&mut self, nickname: Option<String>) {
        self.nickname = nickname;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_has_generated_id() {
        let user = User::new("o6_bmjrPTlm6_2sgVt7hMZOPfL2M".to_string());

        // ID should be valid (we can convert to string and back)
        let id_str = user.id().to_string();
        assert!(id_str.starts_with("usr_"));
    }

    #[test]
    fn new_user_has_open_id() {
        let user = User::new("o6_openid".to_string());

        assert_eq!(user.wechat_open_id(), "o6_openid");
        assert!(user.wechat_union_id().is_none());
        assert!(user.nickname().is_none());
    }

    #[test]
    fn new_user_has_timestamps() {
        let before = Utc::now();
        let user = User::new("o6_openid".to_string());
        let after = Utc::now();

        assert!(user.created_at() >= before);
        assert!(user.created_at() <= after);
        assert_eq!(user.created_at(), user.updated_at());
    }

    #[test]
    fn set_union_id_updates_timestamp() {
        let mut user = User::new("o6_openid".to_string());
        let original_updated_at = user.updated_at();

        // Small delay to ensure timestamp changes
        std::thread::sleep(std::time::Duration::from_millis(1));

        user.set_wechat_union_id(Some("u_unionid".to_string()));

        assert_eq!(user.wechat_union_id(), Some("u_unionid"));
        assert!(user.updated_at() > original_updated_at);
    }

    #[test]
    fn set_nickname_updates_timestamp() {
        let mut user = User::new("o6_openid".to_string());
        let original_updated_at = user.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(1));

        user.set_nickname(Some("墨客".to_string()));

        assert_eq!(user.nickname(), Some("墨客"));
        assert!(user.updated_at() > original_updated_at);
    }

    #[test]
    fn with_all_fields_preserves_values() {
        let id = UserId::new();
        let created = Utc::now() - chrono::Duration::days(30);
        let updated = Utc::now() - chrono::Duration::days(1);

        let user = User::with_all_fields(
            id,
            "o6_openid".to_string(),
            Some("u_unionid".to_string()),
            Some("墨客".to_string()),
            created,
            updated,
        );

        assert_eq!(user.id(), id);
        assert_eq!(user.wechat_open_id(), "o6_openid");
        assert_eq!(user.wechat_union_id(), Some("u_unionid"));
        assert_eq!(user.nickname(), Some("墨客"));
        assert_eq!(user.created_at(), created);
        assert_eq!(user.updated_at(), updated);
    }

    #[test]
    fn user_serialization_roundtrip() {
        let mut user = User::new("o6_openid".to_string());
        user.set_nickname(Some("ink".to_string()));

        let json = serde_json::to_string(&user).expect("serialize");
        let parsed: User = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(user, parsed);
    }
}
