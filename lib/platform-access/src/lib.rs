//! Platform access and authentication for brushnote.
//!
//! This crate provides:
//! - User management (`User`, keyed by WeChat openid)
//! - Session management (`Session`, `SessionId`)
//! - WeChat OAuth2 configuration and token-grant types
//! - Authentication error types
//!
//! # Access Control Model
//!
//! brushnote has a single access level: a user who completes the WeChat
//! scan-to-login flow gets a session and full access to their own data.
//! Sessions are short-lived and database-backed, so revoking access is
//! bounded by the session duration.
//!
//! # Example
//!
//! ```
//! use brushnote_platform_access::{Session, SessionId, User};
//! use chrono::Duration;
//!
//! // Create a user after a successful WeChat code exchange
//! let mut user = User::new("o6_bmjrPTlm6_2sgVt7hMZOPfL2M".to_string());
//! user.set_nickname(Some("墨客".to_string()));
//!
//! // Create a session
//! let session = Session::new(
//!     SessionId::new("sess_abc123".to_string()),
//!     user.id(),
//!     Duration::minutes(30),
//! );
//!
//! assert!(session.is_valid());
//! ```

pub mod error;
pub mod session;
pub mod user;
pub mod wechat;

// Re-export main types at crate root
pub use error::AuthenticationError;
pub use session::{Session, SessionId};
pub use user::User;
pub use wechat::{WechatAuthorization, WechatConfig, WechatTokenGrant};
