//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since these endpoints
//! are only meaningful in the browser.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Deserialize;

/// Path of the authorization-URL endpoint.
pub const WECHAT_AUTH_URL_ENDPOINT: &str = "/oauth2/wechat/authurl";

/// JSON envelope returned by the authorization-URL endpoint.
///
/// A body whose `data` field is absent or null deserializes to
/// `data: None` and is treated as "no URL available".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthUrlResponse {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Option<String>,
}

#[cfg(any(test, feature = "hydrate"))]
fn auth_url_request_failed_message(status: u16) -> String {
    format!("auth url request failed: {status}")
}

/// Fetch the WeChat authorization URL from `/oauth2/wechat/authurl`.
///
/// # Errors
///
/// Returns an error string if the request fails to complete or the
/// server responds with a non-OK status. Callers must not treat `Err`
/// like an empty envelope: the login page leaves its loading indicator
/// up on `Err` and only settles to idle on an `Ok` body.
pub async fn fetch_wechat_auth_url() -> Result<AuthUrlResponse, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(WECHAT_AUTH_URL_ENDPOINT)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(auth_url_request_failed_message(resp.status()));
        }
        // A malformed body on a 2xx response counts as "no URL", not a
        // failure, so the page still settles into its idle state.
        Ok(resp.json::<AuthUrlResponse>().await.unwrap_or_default())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}
