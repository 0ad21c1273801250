//! Student Form State
//!
//! Field values behind the create/edit modal and the preview score.

use crate::error::ApiError;
use crate::models::{Student, StudentInput, StudentPatch, StudentStatus};

pub const DEFAULT_ATTENDANCE: u8 = 80;
pub const DEFAULT_ASSIGNMENT: u8 = 75;

#[derive(Debug, Clone, PartialEq)]
pub struct StudentForm {
    pub name: String,
    pub status: StudentStatus,
    pub is_scholarship: bool,
    pub attendance_percentage: u8,
    pub assignment_score: u8,
}

impl Default for StudentForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            status: StudentStatus::Active,
            is_scholarship: false,
            attendance_percentage: DEFAULT_ATTENDANCE,
            assignment_score: DEFAULT_ASSIGNMENT,
        }
    }
}

impl StudentForm {
    /// Seed from an existing record. Zero scores fall back to the defaults.
    pub fn from_student(student: &Student) -> Self {
        let or_default = |value: f64, default: u8| match to_percent(value) {
            0 => default,
            v => v,
        };
        Self {
            name: student.name.clone(),
            status: student.status,
            is_scholarship: student.is_scholarship,
            attendance_percentage: or_default(student.attendance_percentage, DEFAULT_ATTENDANCE),
            assignment_score: or_default(student.assignment_score, DEFAULT_ASSIGNMENT),
        }
    }

    /// Mean of attendance and assignment score, one decimal. Display only;
    /// the server computes the real GPA.
    pub fn preview_score(&self) -> String {
        let mean = (f64::from(self.attendance_percentage) + f64::from(self.assignment_score)) / 2.0;
        format!("{:.1}", mean)
    }

    /// Body to send, or the message to show inline.
    pub fn to_input(&self) -> Result<StudentInput, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Name is required".to_string());
        }
        Ok(StudentInput {
            name: name.to_string(),
            status: self.status,
            is_scholarship: self.is_scholarship,
            attendance_percentage: self.attendance_percentage.min(100),
            assignment_score: self.assignment_score.min(100),
        })
    }

    /// Update body for `original`. A score still at the record's rounded
    /// value is left out so a fractional score on the server survives.
    pub fn to_patch(&self, original: &Student) -> Result<StudentPatch, String> {
        let input = self.to_input()?;
        let changed = |value: u8, stored: f64| (value != to_percent(stored)).then_some(value);
        Ok(StudentPatch {
            attendance_percentage: changed(input.attendance_percentage, original.attendance_percentage),
            assignment_score: changed(input.assignment_score, original.assignment_score),
            name: Some(input.name),
            status: Some(input.status),
            is_scholarship: Some(input.is_scholarship),
        })
    }
}

/// Round and clamp into 0..=100
pub fn to_percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Parse a range input's value
pub fn parse_percent(raw: &str) -> u8 {
    raw.trim().parse::<f64>().map(to_percent).unwrap_or(0)
}

/// What the dashboard reports back after the modal asks it to save
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Persisted; the dashboard closes the modal
    Saved,
    /// Keep the modal open and show the message
    Failed(String),
}

impl<T> From<Result<T, ApiError>> for SaveOutcome {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(_) => SaveOutcome::Saved,
            Err(err) if err.message().is_empty() => SaveOutcome::Failed("Failed to save student".into()),
            Err(err) => SaveOutcome::Failed(err.message().to_string()),
        }
    }
}
