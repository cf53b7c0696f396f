//! Authentication routes for the WeChat login flow and logout.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use brushnote_platform_access::{Session, SessionId, User};
use chrono::Duration as ChronoDuration;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::Duration as TimeDuration;

use super::{
    AppState,
    db::{SessionRepository, UserRepository, generate_session_id},
    middleware::RequireAuth,
};

/// Session cookie name.
const SESSION_COOKIE: &str = "session";

/// State cookie name (for CSRF protection during the WeChat flow).
const WECHAT_AUTH_STATE_COOKIE: &str = "wechat_auth_state";

/// JSON envelope used by the API routes.
///
/// The shape on the wire is `{"code":0,"msg":"","data":...}`; an absent
/// payload serializes as `"data":null`.
#[derive(Debug, Serialize)]
pub struct ApiResult<T> {
    pub code: i64,
    pub msg: String,
    pub data: Option<T>,
}

impl<T> ApiResult<T> {
    /// A successful envelope carrying a payload.
    pub fn ok(data: T) -> Self {
        Self {
            code: 0,
            msg: String::new(),
            data: Some(data),
        }
    }

    /// A failure envelope with no payload.
    pub fn error(code: i64, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// Query parameters for the WeChat callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    code: String,
    state: String,
}

/// Returns the WeChat authorization URL for the login page to redirect
/// the browser to.
///
/// The freshly generated state is stored in a cookie and checked on
/// callback.
pub async fn authurl(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    let login_state = generate_login_state();
    let auth_url = state.wechat_client.authorization_url(&login_state);

    let cookie = Cookie::build((WECHAT_AUTH_STATE_COOKIE, login_state))
        .path("/")
        .http_only(true)
        .secure(state.session_config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::minutes(10));

    (jar.add(cookie), Json(ApiResult::ok(auth_url)))
}

/// Handles the WeChat callback after the user confirms the QR scan.
pub async fn callback(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CallbackQuery>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AuthError> {
    // Validate the state against the cookie set by authurl
    let state_cookie = jar
        .get(WECHAT_AUTH_STATE_COOKIE)
        .ok_or(AuthError::MissingAuthState)?;

    if query.state != state_cookie.value() {
        return Err(AuthError::StateMismatch);
    }

    // Exchange the code for a validated authorization
    let authorization = state
        .wechat_client
        .exchange_code(&query.code)
        .await
        .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

    // Find or create the user by openid
    let user_repo = UserRepository::new(state.db_pool.clone());
    let existing_user = user_repo
        .find_by_wechat_open_id(&authorization.open_id)
        .await
        .map_err(|e| AuthError::Database(e.to_string()))?;

    let user = match existing_user {
        Some(mut user) => {
            // A unionid can appear later, once the open-platform account
            // is bound to other applications
            if user.wechat_union_id().is_none() && authorization.union_id.is_some() {
                user.set_wechat_union_id(authorization.union_id.clone());
                user_repo
                    .update(&user)
                    .await
                    .map_err(|e| AuthError::Database(e.to_string()))?;
            }
            user
        }
        None => {
            let mut user = User::new(authorization.open_id.clone());
            user.set_wechat_union_id(authorization.union_id.clone());
            user_repo
                .create(&user)
                .await
                .map_err(|e| AuthError::Database(e.to_string()))?;
            user
        }
    };

    // Create session
    let session_id = generate_session_id();
    let session_duration = state.session_config.duration_minutes;
    let session = Session::with_tokens(
        session_id.clone(),
        user.id(),
        ChronoDuration::minutes(session_duration),
        authorization.access_token,
        authorization.refresh_token,
    );

    let session_repo = SessionRepository::new(state.db_pool.clone());
    session_repo
        .create(&session)
        .await
        .map_err(|e| AuthError::Database(e.to_string()))?;

    // Set session cookie
    let session_cookie = Cookie::build((SESSION_COOKIE, session_id.as_str().to_string()))
        .path("/")
        .http_only(true)
        .secure(state.session_config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::minutes(session_duration));

    // Remove state cookie
    let remove_auth_state = Cookie::build((WECHAT_AUTH_STATE_COOKIE, ""))
        .path("/")
        .max_age(TimeDuration::ZERO);

    let jar = jar.add(session_cookie).add(remove_auth_state);

    Ok((jar, Redirect::to("/")))
}

/// Logs out the user by deleting their session.
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    // Get session ID from cookie
    if let Some(session_cookie) = jar.get(SESSION_COOKIE) {
        let session_id = SessionId::new(session_cookie.value().to_string());

        // Delete session from database
        let session_repo = SessionRepository::new(state.db_pool.clone());
        let _ = session_repo.delete(&session_id).await;
    }

    // Remove session cookie
    let remove_session = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(TimeDuration::ZERO);

    (jar.add(remove_session), Redirect::to("/"))
}

/// Profile payload for `/api/profile`.
#[derive(Debug, Serialize)]
pub struct ProfileData {
    pub nickname: Option<String>,
    pub member_since: String,
}

/// Returns the authenticated user's profile.
pub async fn profile(RequireAuth(current): RequireAuth) -> Json<ApiResult<ProfileData>> {
    Json(ApiResult::ok(ProfileData {
        nickname: current.user.nickname().map(|s| s.to_string()),
        member_since: current.user.created_at().to_rfc3339(),
    }))
}

/// Generates the per-login state nonce using ULID.
fn generate_login_state() -> String {
    ulid::Ulid::new().to_string()
}

/// Authentication errors.
#[derive(Debug)]
pub enum AuthError {
    MissingAuthState,
    StateMismatch,
    TokenExchange(String),
    Database(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingAuthState => (StatusCode::BAD_REQUEST, "Missing auth state"),
            Self::StateMismatch => (StatusCode::BAD_REQUEST, "State mismatch"),
            Self::TokenExchange(msg) => {
                tracing::error!("WeChat token exchange failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Authentication failed")
            }
            Self::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_serializes_with_zero_code() {
        let envelope = ApiResult::ok("https://example.com/auth".to_string());
        let json = serde_json::to_string(&envelope).expect("serialize");

        assert_eq!(
            json,
            r#"{"code":0,"msg":"","data":"https://example.com/auth"}"#
        );
    }

    #[test]
    fn error_envelope_serializes_with_null_data() {
        let envelope: ApiResult<String> = ApiResult::error(5, "system error");
        let json = serde_json::to_string(&envelope).expect("serialize");

        assert_eq!(json, r#"{"code":5,"msg":"system error","data":null}"#);
    }

    #[test]
    fn profile_envelope_nests_payload_under_data() {
        let envelope = ApiResult::ok(ProfileData {
            nickname: Some("墨客".to_string()),
            member_since: "2026-01-01T00:00:00+00:00".to_string(),
        });
        let json = serde_json::to_value(&envelope).expect("serialize");

        assert_eq!(json["code"], 0);
        assert_eq!(json["data"]["nickname"], "墨客");
    }

    #[test]
    fn login_state_is_unique_per_call() {
        assert_ne!(generate_login_state(), generate_login_state());
    }
}
