//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::api::ApiClient;

/// Which top-level screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Splash,
    Auth,
    Dashboard,
}

impl Screen {
    /// Where the splash hands off to
    pub fn after_splash(authenticated: bool) -> Self {
        if authenticated {
            Screen::Dashboard
        } else {
            Screen::Auth
        }
    }
}

/// App-wide handles provided via context
#[derive(Clone)]
pub struct AppContext {
    /// Client holding the session for every remote call
    pub client: ApiClient,
    /// Current top-level screen - read
    pub screen: ReadSignal<Screen>,
    /// Current top-level screen - write
    set_screen: WriteSignal<Screen>,
}

impl AppContext {
    pub fn new(client: ApiClient, screen: (ReadSignal<Screen>, WriteSignal<Screen>)) -> Self {
        Self {
            client,
            screen: screen.0,
            set_screen: screen.1,
        }
    }

    /// Leave the splash based on whether a token survived the reload
    pub fn finish_splash(&self) {
        let next = Screen::after_splash(self.client.session().is_authenticated());
        log::info!("[APP] Boot finished, showing {:?}", next);
        self.set_screen.set(next);
    }

    pub fn signed_in(&self) {
        self.set_screen.set(Screen::Dashboard);
    }

    pub fn signed_out(&self) {
        self.set_screen.set(Screen::Auth);
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
