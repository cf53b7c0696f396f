//! Home page component.

use crate::user::get_current_user;
use leptos::prelude::*;

/// The home page component.
#[component]
pub fn HomePage() -> impl IntoView {
    let user = Resource::new(|| (), |_| get_current_user());

    view! {
        <div class="home-page">
            <Suspense fallback=move || view! { <p>"Loading..."</p> }>
                {move || {
                    user.get().map(|result| {
                        match result {
                            Ok(Some(user_info)) => {
                                let greeting = user_info.nickname.clone()
                                    .map(|n| format!("Welcome back, {}!", n))
                                    .unwrap_or_else(|| "Welcome back!".to_string());
                                view! {
                                    <div>
                                        <h1>{greeting}</h1>
                                        <p>"Your notebooks are ready."</p>
                                    </div>
                                }.into_any()
                            },
                            Ok(None) => view! {
                                <div>
                                    <h1>"brushnote"</h1>
                                    <p>"Write it down before it fades."</p>
                                    <p>"Please log in to open your notebooks."</p>
                                    <a href="/login" class="cta-button">"Log in"</a>
                                </div>
                            }.into_any(),
                            Err(_) => view! {
                                <div>
                                    <h1>"brushnote"</h1>
                                    <p>"Write it down before it fades."</p>
                                    <a href="/login" class="cta-button">"Log in"</a>
                                </div>
                            }.into_any(),
                        }
                    })
                }}
            </Suspense>
        </div>
    }
}
