//! Authentication module for the brushnote server.
//!
//! This module provides:
//! - WeChat QR-code login (authorization URL + callback code exchange)
//! - Database-backed session management
//! - An authentication extractor for Axum routes
//!
//! # Authorization Model
//!
//! brushnote has a single access level: completing the WeChat
//! scan-to-login flow yields a session, and a valid session grants
//! access to the user's own data. Sessions are short-lived, so access
//! revocation latency is bounded by the session duration.

pub mod db;
pub mod middleware;
pub mod routes;
pub mod wechat;

use crate::config::SessionConfig;
use sqlx::PgPool;

pub use middleware::RequireAuth;
pub use routes::{authurl, callback, logout, profile};
pub use wechat::WechatOAuthClient;

/// Shared application state.
pub struct AppState {
    /// Database connection pool.
    pub db_pool: PgPool,
    /// WeChat client for the QR-code login flow.
    pub wechat_client: WechatOAuthClient,
    /// Session configuration.
    pub session_config: SessionConfig,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        db_pool: PgPool,
        wechat_client: WechatOAuthClient,
        session_config: SessionConfig,
    ) -> Self {
        Self {
            db_pool,
            wechat_client,
            session_config,
        }
    }
}
