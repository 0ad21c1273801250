//! Student Portal App
//!
//! Boot splash, then the auth screen or the dashboard depending on the
//! persisted session.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiClient;
use crate::components::{AuthView, Dashboard, Loader};
use crate::config::SPLASH_DELAY_MS;
use crate::context::{AppContext, Screen};
use crate::session::Session;

#[component]
pub fn App() -> impl IntoView {
    let client = ApiClient::browser(Session::browser());
    let ctx = AppContext::new(client, signal(Screen::Splash));
    provide_context(ctx.clone());
    let screen = ctx.screen;

    let on_auth_success = Callback::new({
        let ctx = ctx.clone();
        move |_: ()| ctx.signed_in()
    });
    let on_logout = Callback::new({
        let ctx = ctx.clone();
        move |_: ()| ctx.signed_out()
    });

    // The delay is cosmetic; nothing is initialized while it runs.
    spawn_local(async move {
        TimeoutFuture::new(SPLASH_DELAY_MS).await;
        ctx.finish_splash();
    });

    view! {
        {move || match screen.get() {
            Screen::Splash => view! { <Loader /> }.into_any(),
            Screen::Auth => view! { <AuthView on_auth_success=on_auth_success /> }.into_any(),
            Screen::Dashboard => view! { <Dashboard on_logout=on_logout /> }.into_any(),
        }}
    }
}
