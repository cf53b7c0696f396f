//! WeChat QR-code login client.
//!
//! Implements the "网站应用微信登录" flow:
//! - `authorization_url` builds the QR-connect page URL the browser is
//!   sent to
//! - `exchange_code` trades the callback code for a token grant at the
//!   sns access-token endpoint
//!
//! WeChat's flow is shaped like OAuth2 but is not spec-compliant: the
//! token endpoint is a GET with query parameters, and failures arrive
//! as `errcode`/`errmsg` inside a 200 body. The requests are therefore
//! hand-built over reqwest instead of going through an OAuth2 crate.

use brushnote_platform_access::{WechatAuthorization, WechatConfig, WechatTokenGrant};

/// WeChat QR-connect authorization page.
const WECHAT_QRCONNECT_URL: &str = "https://open.weixin.qq.com/connect/qrconnect";

/// WeChat sns access-token endpoint.
const WECHAT_ACCESS_TOKEN_URL: &str = "https://api.weixin.qq.com/sns/oauth2/access_token";

/// WeChat login client configuration.
#[derive(Clone)]
pub struct WechatOAuthClient {
    config: WechatConfig,
    auth_url: String,
    token_url: String,
}

impl WechatOAuthClient {
    /// Creates a new WeChat client from configuration.
    #[must_use]
    pub fn new(config: WechatConfig) -> Self {
        Self {
            config,
            auth_url: WECHAT_QRCONNECT_URL.to_string(),
            token_url: WECHAT_ACCESS_TOKEN_URL.to_string(),
        }
    }

    /// Generates the QR-connect authorization URL for the given state.
    ///
    /// The `#wechat_redirect` fragment is required by WeChat; without it
    /// the QR page refuses to render.
    #[must_use]
    pub fn authorization_url(&self, state: &str) -> String {
        let query: String = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("appid", self.config.app_id())
            .append_pair("redirect_uri", self.config.redirect_uri())
            .append_pair("response_type", "code")
            .append_pair("scope", self.config.scope())
            .append_pair("state", state)
            .finish();

        format!("{}?{}#wechat_redirect", self.auth_url, query)
    }

    /// Exchanges the callback code for a validated authorization.
    pub async fn exchange_code(
        &self,
        code: &str,
    ) -> Result<WechatAuthorization, WechatOAuthError> {
        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| WechatOAuthError::TokenExchange(format!("HTTP client error: {}", e)))?;

        let grant: WechatTokenGrant = http_client
            .get(&self.token_url)
            .query(&[
                ("appid", self.config.app_id()),
                ("secret", self.config.app_secret()),
                ("code", code),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| WechatOAuthError::TokenExchange(format!("request failed: {}", e)))?
            .json()
            .await
            .map_err(|e| WechatOAuthError::TokenExchange(format!("malformed grant body: {}", e)))?;

        grant
            .into_authorization()
            .map_err(|e| WechatOAuthError::GrantRejected(e.to_string()))
    }
}

/// WeChat login errors.
#[derive(Debug)]
pub enum WechatOAuthError {
    /// Token exchange request failed to complete.
    TokenExchange(String),
    /// WeChat rejected the grant (errcode) or the grant was unusable.
    GrantRejected(String),
}

impl std::fmt::Display for WechatOAuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenExchange(msg) => write!(f, "WeChat token exchange error: {}", msg),
            Self::GrantRejected(msg) => write!(f, "WeChat grant rejected: {}", msg),
        }
    }
}

impl std::error::Error for WechatOAuthError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> WechatOAuthClient {
        WechatOAuthClient::new(WechatConfig::new(
            "wx1234567890abcdef".to_string(),
            "app_secret".to_string(),
            "https://brushnote.dev/oauth2/wechat/callback".to_string(),
        ))
    }

    #[test]
    fn authorization_url_has_qrconnect_shape() {
        let url = test_client().authorization_url("state_abc");

        assert!(url.starts_with("https://open.weixin.qq.com/connect/qrconnect?appid=wx1234567890abcdef&"));
        assert!(url.ends_with("#wechat_redirect"));
    }

    #[test]
    fn authorization_url_percent_encodes_redirect_uri() {
        let url = test_client().authorization_url("state_abc");

        assert!(url.contains(
            "redirect_uri=https%3A%2F%2Fbrushnote.dev%2Foauth2%2Fwechat%2Fcallback"
        ));
        // The raw URI must not survive unencoded.
        assert!(!url.contains("redirect_uri=https://"));
    }

    #[test]
    fn authorization_url_carries_code_response_scope_and_state() {
        let url = test_client().authorization_url("state_abc");

        assert!(url.contains("response_type=code"));
        assert!(url.contains("scope=snsapi_login"));
        assert!(url.contains("state=state_abc"));
    }

    #[test]
    fn distinct_states_yield_distinct_urls() {
        let client = test_client();
        assert_ne!(
            client.authorization_url("state_one"),
            client.authorization_url("state_two")
        );
    }

    #[test]
    fn error_display_formats() {
        let err = WechatOAuthError::GrantRejected("errcode 40029: invalid code".to_string());
        assert_eq!(
            err.to_string(),
            "WeChat grant rejected: errcode 40029: invalid code"
        );
    }
}
