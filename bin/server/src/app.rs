//! Main Leptos application component and routing.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

use crate::pages::{HomePage, LoginPage, WechatLoginPage};
use crate::types::UserInfo;
use crate::user::get_current_user;

/// The main application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="brushnote"/>
        <Router>
            <Header/>
            <main class="container">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/login") view=LoginPage/>
                    <Route path=path!("/login/wechat") view=WechatLoginPage/>
                </Routes>
            </main>
        </Router>
    }
}

/// Header component with navigation and user menu.
#[component]
fn Header() -> impl IntoView {
    let user = Resource::new(|| (), |_| get_current_user());

    view! {
        <header class="header">
            <div class="header-left">
                <a href="/" class="logo">"brushnote"</a>
            </div>
            <div class="header-right">
                <Suspense fallback=move || view! { <span>"Loading..."</span> }>
                    {move || {
                        user.get().map(|result| {
                            match result {
                                Ok(Some(user_info)) => view! {
                                    <UserMenu user_info=user_info/>
                                }.into_any(),
                                Ok(None) => view! {
                                    <a href="/login" class="login-button">"Log in"</a>
                                }.into_any(),
                                Err(_) => view! {
                                    <a href="/login" class="login-button">"Log in"</a>
                                }.into_any(),
                            }
                        })
                    }}
                </Suspense>
            </div>
        </header>
    }
}

/// User menu dropdown component.
#[component]
fn UserMenu(user_info: UserInfo) -> impl IntoView {
    let display_name = user_info.nickname.unwrap_or_else(|| "User".to_string());

    view! {
        <div class="user-menu">
            <span class="user-name">{display_name}</span>
            <div class="user-dropdown">
                <a href="/auth/logout" rel="external">"Log out"</a>
            </div>
        </div>
    }
}
