//! Dashboard Component
//!
//! Owns the roster store and drives every list and mutation call. Views read
//! fields of the store; user actions go through [`RosterState`] transitions,
//! and each transition that needs data spawns exactly one fetch.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::components::{DeleteConfirmDialog, StatCard, StudentModal, StudentRow};
use crate::context::use_app_context;
use crate::models::{Student, StudentStatus};
use crate::roster::{has_next_page, page_count_hint, save_student, RosterState, RosterStateStoreFields, RosterStats};
use crate::store::{store_transition, use_roster_store};
use crate::student_form::{SaveOutcome, StudentForm};

#[component]
pub fn Dashboard(#[prop(into)] on_logout: Callback<()>) -> impl IntoView {
    let client = use_app_context().client;
    let store = Store::new(RosterState::default());
    provide_context(store);

    // Initial load
    store_transition(store, &client, |state| Some(state.begin_fetch()));

    let stats = Memo::new(move |_| store.students().with(|rows| RosterStats::from_students(rows)));
    // Memoized so unrelated store writes don't rebuild the modal and lose its input.
    // Keyed by the open sequence so every open mounts a fresh modal.
    let editor = Memo::new(move |_| {
        let seq = store.editor_seq().get();
        store.editor().get().map(|editor| (seq, editor))
    });
    let pending_delete = Memo::new(move |_| store.pending_delete().get());

    let on_save = Callback::new({
        let client = client.clone();
        move |(form, reply): (StudentForm, Callback<SaveOutcome>)| {
            let Some(editor) = store.editor().get_untracked() else {
                return;
            };
            let opened = store.editor_seq().get_untracked();
            let client = client.clone();
            spawn_local(async move {
                let result = save_student(&client, &editor, &form).await;
                let mut answer = None;
                store_transition(store, &client, |state| {
                    let finish = state.save_finished(opened, &editor, result);
                    answer = finish.reply;
                    finish.refetch
                });
                // Only set while the requesting modal is still mounted.
                if let Some(outcome) = answer {
                    reply.run(outcome);
                }
            });
        }
    });

    let on_confirm_delete = Callback::new({
        let client = client.clone();
        move |_: ()| {
            let Some(id) = store.pending_delete().get_untracked() else {
                return;
            };
            let client = client.clone();
            spawn_local(async move {
                let result = client.delete_student(&id).await;
                store_transition(store, &client, |state| state.delete_finished(result));
            });
        }
    });

    let on_edit = Callback::new(move |student: Student| store.write().open_edit(student));
    let on_delete = Callback::new(move |id: String| store.write().request_delete(id));
    let on_close_modal = Callback::new(move |_: ()| store.write().close_editor());
    let on_cancel_delete = Callback::new(move |_: ()| store.write().cancel_delete());

    let on_search = {
        let client = client.clone();
        move |ev: web_sys::Event| {
            let search = event_target_value(&ev);
            store_transition(store, &client, |state| state.set_search(search));
        }
    };
    let on_status = {
        let client = client.clone();
        move |ev: web_sys::Event| {
            let status = StudentStatus::parse(&event_target_value(&ev));
            store_transition(store, &client, |state| state.set_status(status));
        }
    };
    let on_sign_out = {
        let client = client.clone();
        move |_: web_sys::MouseEvent| {
            client.logout();
            on_logout.run(());
        }
    };

    view! {
        <div class="dashboard">
            <nav class="top-bar">
                <h1>"AI Campus Portal"</h1>
                <button class="secondary-btn" on:click=on_sign_out>"Logout"</button>
            </nav>

            <section class="stats-grid">
                <StatCard label="Total Students" value=Signal::derive(move || stats.get().total.to_string()) />
                <StatCard label="Scholarship Students" value=Signal::derive(move || stats.get().scholarship.to_string()) />
                <StatCard label="Avg Performance" value=Signal::derive(move || format!("{}%", stats.get().average_performance)) />
            </section>

            <section class="roster">
                <div class="roster-header">
                    <h2>"Students"</h2>
                    <button class="primary-btn" on:click=move |_| store.write().open_create()>"Add Student"</button>
                </div>

                {move || store.error().get().map(|msg| view! { <div class="error-banner">{msg}</div> })}

                <div class="filters">
                    <input
                        type="text"
                        placeholder="Search by name..."
                        prop:value=move || store.query().with(|q| q.search.clone())
                        on:input=on_search
                    />
                    <select on:change=on_status>
                        <option value="" selected=move || store.query().with(|q| q.status.is_none())>"All Status"</option>
                        {StudentStatus::ALL.into_iter().map(|status| view! {
                            <option
                                value=status.as_str()
                                selected=move || store.query().with(|q| q.status == Some(status))
                            >
                                {status.label()}
                            </option>
                        }).collect_view()}
                    </select>
                </div>

                {move || {
                    if store.loading().get() {
                        view! { <p class="roster-placeholder">"Loading students..."</p> }.into_any()
                    } else if store.students().with(|rows| rows.is_empty()) {
                        view! { <p class="roster-placeholder">"No students found"</p> }.into_any()
                    } else {
                        view! {
                            <table class="roster-table">
                                <thead>
                                    <tr>
                                        <th>"Name"</th>
                                        <th>"Status"</th>
                                        <th>"Scholarship"</th>
                                        <th>"Attendance"</th>
                                        <th>"Assignment"</th>
                                        <th>"GPA"</th>
                                        <th class="actions-col">"Actions"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {store.students().get().into_iter().map(|student| view! {
                                        <StudentRow student=student on_edit=on_edit on_delete=on_delete />
                                    }).collect_view()}
                                </tbody>
                            </table>
                        }.into_any()
                    }
                }}

                <RosterPagination />
            </section>

            {move || editor.get().map(|(_, editor)| view! {
                <StudentModal editor=editor on_close=on_close_modal on_save=on_save />
            })}

            {move || pending_delete.get().map(|_| view! {
                <DeleteConfirmDialog on_confirm=on_confirm_delete on_cancel=on_cancel_delete />
            })}
        </div>
    }
}

/// Row count, page number and prev/next controls under the table
#[component]
fn RosterPagination() -> impl IntoView {
    let client = use_app_context().client;
    let store = use_roster_store();

    let on_prev = {
        let client = client.clone();
        move |_: web_sys::MouseEvent| store_transition(store, &client, RosterState::prev_page)
    };
    let on_next = move |_: web_sys::MouseEvent| store_transition(store, &client, RosterState::next_page);

    view! {
        <div class="pagination">
            <p>{move || format!("Showing {} students", store.students().with(|rows| rows.len()))}</p>
            <div class="pagination-controls">
                <button
                    class="page-btn"
                    disabled=move || store.query().with(|q| q.page <= 1)
                    on:click=on_prev
                >
                    "‹"
                </button>
                <span class="page-label">
                    {move || format!(
                        "Page {} of {}",
                        store.query().with(|q| q.page),
                        store.students().with(|rows| page_count_hint(rows.len())),
                    )}
                </span>
                <button
                    class="page-btn"
                    disabled=move || !store.students().with(|rows| has_next_page(rows.len()))
                    on:click=on_next
                >
                    "›"
                </button>
            </div>
        </div>
    }
}
