//! Frontend Models
//!
//! Data structures matching the remote student API.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Enrollment status of a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
    Graduated,
}

impl StudentStatus {
    pub const ALL: [StudentStatus; 3] = [
        StudentStatus::Active,
        StudentStatus::Inactive,
        StudentStatus::Graduated,
    ];

    /// Wire value, also used as the `<option>` value
    pub fn as_str(self) -> &'static str {
        match self {
            StudentStatus::Active => "active",
            StudentStatus::Inactive => "inactive",
            StudentStatus::Graduated => "graduated",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StudentStatus::Active => "Active",
            StudentStatus::Inactive => "Inactive",
            StudentStatus::Graduated => "Graduated",
        }
    }

    /// Parse a select value; anything unknown (including "") is `None`
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Student record as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub name: String,
    pub status: StudentStatus,
    #[serde(alias = "isScholarship", deserialize_with = "flag_from_int", default)]
    pub is_scholarship: bool,
    #[serde(alias = "attendancePercentage", default)]
    pub attendance_percentage: f64,
    #[serde(alias = "assignmentScore", default)]
    pub assignment_score: f64,
    #[serde(alias = "gradePointAverage", default)]
    pub grade_point_average: Option<f64>,
}

/// Accept either a JSON string or number for opaque ids
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Scholarship arrives as 0/1; a plain boolean is accepted too
fn flag_from_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Bool(bool),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<RawFlag>::deserialize(deserializer)? {
        Some(RawFlag::Bool(b)) => b,
        Some(RawFlag::Int(i)) => i == 1,
        Some(RawFlag::Float(f)) => f == 1.0,
        None => false,
    })
}

/// Body for `POST /api/students`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInput {
    pub name: String,
    pub status: StudentStatus,
    pub is_scholarship: bool,
    pub attendance_percentage: u8,
    pub assignment_score: u8,
}

/// Body for `PUT /api/students/{id}`; unset fields are left out
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StudentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_scholarship: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance_percentage: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment_score: Option<u8>,
}

/// Sign-in / sign-up body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// `POST /auth/login` response; only the token matters to the client
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// Optional roster filters; empty values are never sent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
    pub status: Option<StudentStatus>,
    pub search: Option<String>,
}
