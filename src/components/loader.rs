//! Boot Loader Component
//!
//! Splash shown while the app starts: a progress bar that fills in fixed
//! steps. It runs independently of the splash timer in `App`.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::config::{SPLASH_STEP_PERCENT, SPLASH_TICK_MS};

/// Advance by one step, saturating at 100
pub fn next_progress(current: u32) -> u32 {
    (current + SPLASH_STEP_PERCENT).min(100)
}

#[component]
pub fn Loader() -> impl IntoView {
    let (progress, set_progress) = signal(0u32);

    spawn_local(async move {
        loop {
            TimeoutFuture::new(SPLASH_TICK_MS).await;
            // Stops once full, or once the splash has been unmounted.
            let done = set_progress.try_update(|p| {
                *p = next_progress(*p);
                *p >= 100
            });
            if done != Some(false) {
                break;
            }
        }
    });

    view! {
        <div class="loader">
            <div class="loader-core"></div>
            <div class="loader-progress">
                <div
                    class="loader-progress-fill"
                    style=move || format!("width: {}%", progress.get())
                ></div>
            </div>
            <p class="loader-title">"Initializing Student Portal"</p>
            <p class="loader-percent">{move || format!("{}%", progress.get())}</p>
        </div>
    }
}
