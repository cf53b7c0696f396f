//! WeChat open-platform configuration and token-grant types.
//!
//! This module provides the configuration for the WeChat QR-code login
//! flow ("网站应用微信登录") and the domain types for the token grant
//! returned by the sns access-token endpoint. WeChat's flow is shaped
//! like OAuth2 but is not spec-compliant: the token endpoint is a GET
//! and errors arrive as `errcode`/`errmsg` inside a 200 response.

use rootcause::prelude::Report;
use serde::{Deserialize, Serialize};

use crate::error::AuthenticationError;

/// Configuration for the WeChat open-platform application.
///
/// Fields with defaults can be omitted when loading from environment
/// variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WechatConfig {
    /// The appid assigned by the WeChat open platform.
    app_id: String,
    /// The application secret.
    app_secret: String,
    /// The callback URI registered with WeChat
    /// (e.g., "https://brushnote.dev/oauth2/wechat/callback").
    redirect_uri: String,
    /// The authorization scope. Default: "snsapi_login"
    /// (the only scope valid for the QR-code web login flow).
    #[serde(default = "default_scope")]
    scope: String,
}

fn default_scope() -> String {
    "snsapi_login".to_string()
}

impl WechatConfig {
    /// Creates a new WeChat configuration with the default scope.
    #[must_use]
    pub fn new(app_id: String, app_secret: String, redirect_uri: String) -> Self {
        Self {
            app_id,
            app_secret,
            redirect_uri,
            scope: default_scope(),
        }
    }

    /// Returns the appid.
    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Returns the application secret.
    #[must_use]
    pub fn app_secret(&self) -> &str {
        &self.app_secret
    }

    /// Returns the callback URI.
    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Returns the authorization scope.
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }
}

/// Raw body of the WeChat sns access-token endpoint.
///
/// WeChat returns HTTP 200 for both outcomes; a failed exchange carries
/// a non-zero `errcode` instead of the token fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WechatTokenGrant {
    #[serde(default)]
    pub errcode: i64,
    #[serde(default)]
    pub errmsg: String,

    pub access_token: Option<String>,
    pub expires_in: Option<i64>,
    pub refresh_token: Option<String>,

    pub scope: Option<String>,

    /// Unique ID for this user under our application.
    pub openid: Option<String>,
    /// Unique ID for this user across all of our applications.
    pub unionid: Option<String>,
}

/// A validated WeChat authorization: the identity and tokens extracted
/// from a successful token grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WechatAuthorization {
    pub open_id: String,
    pub union_id: Option<String>,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in_seconds: Option<i64>,
}

impl WechatTokenGrant {
    /// Validates the grant and extracts the authorization.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the grant carries a non-zero
    /// `errcode`, and `MissingGrantField` when a required field is
    /// absent from an otherwise successful grant.
    pub fn into_authorization(self) -> Result<WechatAuthorization, Report<AuthenticationError>> {
        if self.errcode != 0 {
            return Err(AuthenticationError::ProviderError {
                provider: "wechat".to_string(),
                reason: format!("errcode {}: {}", self.errcode, self.errmsg),
            }
            .into());
        }

        let open_id = self.openid.ok_or_else(|| {
            Report::from(AuthenticationError::MissingGrantField {
                field: "openid".to_string(),
            })
        })?;
        let access_token = self.access_token.ok_or_else(|| {
            Report::from(AuthenticationError::MissingGrantField {
                field: "access_token".to_string(),
            })
        })?;

        Ok(WechatAuthorization {
            open_id,
            union_id: self.unionid,
            access_token,
            refresh_token: self.refresh_token,
            expires_in_seconds: self.expires_in,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_login_scope() {
        let config = WechatConfig::new(
            "wx1234567890abcdef".to_string(),
            "secret".to_string(),
            "https://brushnote.dev/oauth2/wechat/callback".to_string(),
        );
        assert_eq!(config.scope(), "snsapi_login");
    }

    #[test]
    fn config_deserializes_without_scope() {
        let config: WechatConfig = serde_json::from_str(
            r#"{
                "app_id": "wx1234567890abcdef",
                "app_secret": "secret",
                "redirect_uri": "https://brushnote.dev/oauth2/wechat/callback"
            }"#,
        )
        .expect("deserialize");

        assert_eq!(config.app_id(), "wx1234567890abcdef");
        assert_eq!(config.scope(), "snsapi_login");
    }

    #[test]
    fn successful_grant_yields_authorization() {
        let grant: WechatTokenGrant = serde_json::from_str(
            r#"{
                "access_token": "ACCESS_TOKEN",
                "expires_in": 7200,
                "refresh_token": "REFRESH_TOKEN",
                "openid": "o6_bmjrPTlm6_2sgVt7hMZOPfL2M",
                "scope": "snsapi_login",
                "unionid": "o6_bmasdasdsad6_2sgVt7hMZOPfL"
            }"#,
        )
        .expect("deserialize");

        let auth = grant.into_authorization().expect("should validate");
        assert_eq!(auth.open_id, "o6_bmjrPTlm6_2sgVt7hMZOPfL2M");
        assert_eq!(auth.union_id.as_deref(), Some("o6_bmasdasdsad6_2sgVt7hMZOPfL"));
        assert_eq!(auth.access_token, "ACCESS_TOKEN");
        assert_eq!(auth.refresh_token.as_deref(), Some("REFRESH_TOKEN"));
        assert_eq!(auth.expires_in_seconds, Some(7200));
    }

    #[test]
    fn errcode_grant_is_rejected() {
        let grant: WechatTokenGrant =
            serde_json::from_str(r#"{"errcode": 40029, "errmsg": "invalid code"}"#)
                .expect("deserialize");

        let err = grant.into_authorization().expect_err("should reject");
        assert!(err.to_string().contains("40029"));
    }

    #[test]
    fn grant_without_openid_is_rejected() {
        let grant: WechatTokenGrant =
            serde_json::from_str(r#"{"access_token": "ACCESS_TOKEN", "expires_in": 7200}"#)
                .expect("deserialize");

        let err = grant.into_authorization().expect_err("should reject");
        assert!(err.to_string().contains("openid"));
    }

    #[test]
    fn union_id_is_optional() {
        let grant: WechatTokenGrant = serde_json::from_str(
            r#"{"access_token": "ACCESS_TOKEN", "openid": "o6_openid"}"#,
        )
        .expect("deserialize");

        let auth = grant.into_authorization().expect("should validate");
        assert!(auth.union_id.is_none());
    }
}
