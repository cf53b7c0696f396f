//! Shared types used across server functions and UI components.

/// User info for display in the UI.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct UserInfo {
    pub nickname: Option<String>,
}
