//! WeChat scan-to-login page.

use leptos::prelude::*;

use crate::net::api::fetch_wechat_auth_url;

/// WeChat login page - fetches the QR-connect authorization URL and
/// sends the browser there.
///
/// The request fires once per page lifetime: effects never run during
/// SSR, and this one reads no signals, so it runs exactly once after
/// the page is mounted in the browser. If the response carries no
/// usable URL the page settles into an empty container; a failed
/// request leaves the loading indicator up (no retry affordance here,
/// the user re-enters from /login).
#[component]
pub fn WechatLoginPage() -> impl IntoView {
    let (loading, set_loading) = signal(false);

    Effect::new(move |_| {
        set_loading.set(true);
        leptos::task::spawn_local(async move {
            let Ok(body) = fetch_wechat_auth_url().await else {
                // Transport failure or non-2xx status: no reset, no
                // navigation. The loading flag stays set.
                return;
            };
            set_loading.set(false);
            if let Some(url) = body.data.filter(|u| !u.is_empty()) {
                redirect_browser(&url);
            }
        });
    });

    view! {
        <Show when=move || loading.get() fallback=|| view! { <div class="wechat-login"></div> }>
            <p>"Loading..."</p>
        </Show>
    }
}

/// Hard browser navigation. The target is the WeChat-hosted QR page, so
/// this replaces the document rather than routing in-app.
fn redirect_browser(url: &str) {
    #[cfg(feature = "hydrate")]
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(url);
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = url;
}
