//! Login page component.

use leptos::prelude::*;

/// Login page - offers the WeChat scan-to-login entry point.
#[component]
pub fn LoginPage() -> impl IntoView {
    view! {
        <div class="login-page">
            <div class="login-box">
                <h1>"Log in to brushnote"</h1>
                <p>"Scan a QR code with WeChat to log in."</p>
                <a href="/login/wechat" class="login-button">"Log in with WeChat"</a>
            </div>
        </div>
    }
}
