//! Roster Store
//!
//! Uses Leptos reactive_stores so views subscribe to individual fields of
//! [`RosterState`].

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api::ApiClient;
use crate::roster::{fetch_page, FetchTicket, RosterState};

/// Type alias for the store
pub type RosterStore = Store<RosterState>;

/// Get the roster store from context
pub fn use_roster_store() -> RosterStore {
    expect_context::<RosterStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Run `ticket`'s request and apply the response unless the dashboard is
/// gone or a newer fetch has been issued since.
pub fn store_spawn_fetch(store: RosterStore, client: ApiClient, ticket: FetchTicket) {
    spawn_local(async move {
        let result = fetch_page(&client, &ticket).await;
        if let Some(mut state) = store.try_write() {
            state.finish_fetch(&ticket, result);
        }
    });
}

/// Apply a synchronous transition and spawn the fetch it asks for, if any.
pub fn store_transition(
    store: RosterStore,
    client: &ApiClient,
    transition: impl FnOnce(&mut RosterState) -> Option<FetchTicket>,
) {
    let ticket = store.try_write().and_then(|mut state| transition(&mut state));
    if let Some(ticket) = ticket {
        store_spawn_fetch(store, client.clone(), ticket);
    }
}
