//! Auth View Component
//!
//! Sign-in / sign-up form. Sign-up registers and then signs in with the same
//! credentials, since registering does not start a session.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{authenticate, AuthMode};
use crate::context::use_app_context;
use crate::models::Credentials;

#[component]
pub fn AuthView(#[prop(into)] on_auth_success: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();

    let (mode, set_mode) = signal(AuthMode::SignIn);
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        set_error.set(None);
        set_submitting.set(true);

        let client = ctx.client.clone();
        let mode = mode.get_untracked();
        let credentials = Credentials {
            username: username.get_untracked(),
            password: password.get_untracked(),
        };

        spawn_local(async move {
            let result = authenticate(&client, mode, &credentials).await;
            set_submitting.set(false);
            match result {
                Ok(()) => on_auth_success.run(()),
                Err(err) => {
                    log::warn!("[AUTH] {:?} failed: {}", mode, err);
                    set_error.set(Some(err.message().to_string()));
                }
            }
        });
    };

    let toggle_mode = move |_: web_sys::MouseEvent| {
        set_mode.update(|m| *m = m.toggled());
        set_error.set(None);
    };

    view! {
        <div class="auth-screen">
            <div class="auth-card">
                <h2>{move || mode.get().title()}</h2>
                <p class="auth-subtitle">"AI Campus Student Portal"</p>

                <form class="auth-form" on:submit=on_submit>
                    <label for="username">"Username"</label>
                    <input
                        type="text"
                        id="username"
                        placeholder="Enter your username"
                        required
                        prop:value=move || username.get()
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                    />

                    <label for="password">"Password"</label>
                    <input
                        type="password"
                        id="password"
                        placeholder="Enter your password"
                        required
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />

                    {move || error.get().map(|msg| view! { <div class="error-banner">{msg}</div> })}

                    <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Processing..." } else { mode.get().submit_label() }}
                    </button>
                </form>

                <button type="button" class="link-btn" on:click=toggle_mode>
                    {move || mode.get().switch_prompt()}
                </button>
            </div>
        </div>
    }
}
