//! Student Row Component
//!
//! One line of the roster table with edit/delete actions.

use leptos::prelude::*;

use crate::models::{Student, StudentStatus};

/// GPA cell text
pub fn gpa_label(gpa: Option<f64>) -> String {
    match gpa {
        Some(value) => format!("{:.1}", value),
        None => "N/A".to_string(),
    }
}

fn status_class(status: StudentStatus) -> &'static str {
    match status {
        StudentStatus::Active => "status-badge active",
        StudentStatus::Inactive => "status-badge inactive",
        StudentStatus::Graduated => "status-badge graduated",
    }
}

#[component]
pub fn StudentRow(
    student: Student,
    #[prop(into)] on_edit: Callback<Student>,
    #[prop(into)] on_delete: Callback<String>,
) -> impl IntoView {
    let attendance = student.attendance_percentage;
    let id = student.id.clone();
    let for_edit = student.clone();

    view! {
        <tr class="student-row">
            <td class="student-name">{student.name.clone()}</td>
            <td><span class=status_class(student.status)>{student.status.as_str()}</span></td>
            <td>
                {if student.is_scholarship {
                    view! { <span class="scholarship-badge">"Yes"</span> }.into_any()
                } else {
                    view! { <span class="muted">"No"</span> }.into_any()
                }}
            </td>
            <td>
                <div class="attendance">
                    <div class="attendance-bar">
                        <div class="attendance-fill" style=format!("width: {}%", attendance)></div>
                    </div>
                    <span>{format!("{}%", attendance)}</span>
                </div>
            </td>
            <td>{student.assignment_score.to_string()}</td>
            <td class="gpa">{gpa_label(student.grade_point_average)}</td>
            <td class="row-actions">
                <button class="edit-btn" title="Edit" on:click=move |_| on_edit.run(for_edit.clone())>"✎"</button>
                <button class="delete-btn" title="Delete" on:click=move |_| on_delete.run(id.clone())>"🗑"</button>
            </td>
        </tr>
    }
}
