//! Delete Confirm Dialog Component
//!
//! Modal confirmation shown before a student is deleted.

use leptos::prelude::*;

/// Delete confirmation dialog
///
/// # Arguments
/// * `on_confirm` - Callback to execute when user confirms deletion
/// * `on_cancel` - Callback to dismiss the dialog without deleting
#[component]
pub fn DeleteConfirmDialog(
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let (confirming, set_confirming) = signal(false);

    view! {
        <div class="modal-backdrop">
            <div class="modal confirm-dialog">
                <h3>"Confirm Delete"</h3>
                <p>"Are you sure you want to delete this student? This action cannot be undone."</p>
                <div class="modal-actions">
                    <button
                        class="secondary-btn"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            on_cancel.run(());
                        }
                    >
                        "Cancel"
                    </button>
                    <button
                        class="danger-btn"
                        disabled=move || confirming.get()
                        on:click=move |ev| {
                            ev.stop_propagation();
                            set_confirming.set(true);
                            on_confirm.run(());
                        }
                    >
                        "Delete"
                    </button>
                </div>
            </div>
        </div>
    }
}
