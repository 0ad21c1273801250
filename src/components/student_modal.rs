//! Student Modal Component
//!
//! Create/edit form for one student. Saving is delegated to the caller, which
//! answers with a [`SaveOutcome`]: on failure the modal shows the message and
//! stays open, on success the caller closes it.

use leptos::prelude::*;

use crate::models::StudentStatus;
use crate::roster::Editor;
use crate::student_form::{parse_percent, SaveOutcome, StudentForm};

#[component]
pub fn StudentModal(
    editor: Editor,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_save: Callback<(StudentForm, Callback<SaveOutcome>)>,
) -> impl IntoView {
    let server_gpa = editor.backend_gpa();
    let is_edit = editor.student().is_some();
    let form = RwSignal::new(editor.initial_form());
    let (saving, set_saving) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    // Only failures are answered; a success closes the modal.
    let reply = Callback::new(move |outcome: SaveOutcome| {
        if let SaveOutcome::Failed(msg) = outcome {
            set_error.set(Some(msg));
            set_saving.set(false);
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        set_error.set(None);
        set_saving.set(true);
        on_save.run((form.get_untracked(), reply));
    };

    let title = if is_edit { "Edit Student" } else { "Add New Student" };
    let submit_label = if is_edit { "Update Student" } else { "Add Student" };

    view! {
        <div class="modal-backdrop">
            <div class="modal student-modal">
                <div class="modal-header">
                    <h2>{title}</h2>
                    <button type="button" class="close-btn" on:click=move |_| on_close.run(())>"×"</button>
                </div>

                <form class="student-form" on:submit=on_submit>
                    <label>"Student Name *"</label>
                    <input
                        type="text"
                        placeholder="Enter student name"
                        required
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />

                    <label>"Status *"</label>
                    <select
                        on:change=move |ev| {
                            if let Some(status) = StudentStatus::parse(&event_target_value(&ev)) {
                                form.update(|f| f.status = status);
                            }
                        }
                    >
                        {StudentStatus::ALL.into_iter().map(|status| view! {
                            <option
                                value=status.as_str()
                                selected=move || form.with(|f| f.status == status)
                            >
                                {status.label()}
                            </option>
                        }).collect_view()}
                    </select>

                    <label class="checkbox-row">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.is_scholarship)
                            on:change=move |ev| form.update(|f| f.is_scholarship = event_target_checked(&ev))
                        />
                        <span>"Scholarship Student"</span>
                    </label>

                    <label>
                        "Attendance Percentage * "
                        <span class="slider-value">{move || format!("{}%", form.with(|f| f.attendance_percentage))}</span>
                    </label>
                    <input
                        type="range"
                        min="0"
                        max="100"
                        prop:value=move || form.with(|f| f.attendance_percentage.to_string())
                        on:input=move |ev| form.update(|f| f.attendance_percentage = parse_percent(&event_target_value(&ev)))
                    />

                    <label>
                        "Assignment Score * "
                        <span class="slider-value">{move || form.with(|f| f.assignment_score.to_string())}</span>
                    </label>
                    <input
                        type="range"
                        min="0"
                        max="100"
                        prop:value=move || form.with(|f| f.assignment_score.to_string())
                        on:input=move |ev| form.update(|f| f.assignment_score = parse_percent(&event_target_value(&ev)))
                    />

                    <div class="score-preview">
                        <span>"Calculated GPA (Preview)"</span>
                        <span class="score-preview-value">{move || format!("{}%", form.with(|f| f.preview_score()))}</span>
                        {server_gpa.map(|gpa| view! {
                            <div class="score-current">
                                <span>"Current GPA from Backend:"</span>
                                <span>{format!("{:.1}%", gpa)}</span>
                            </div>
                        })}
                    </div>

                    {move || error.get().map(|msg| view! { <div class="error-banner">{msg}</div> })}

                    <div class="modal-actions">
                        <button type="button" class="secondary-btn" on:click=move |_| on_close.run(())>
                            "Cancel"
                        </button>
                        <button type="submit" class="primary-btn" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { submit_label }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
