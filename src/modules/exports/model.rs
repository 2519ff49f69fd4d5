use sqlx::FromRow;

use crate::modules::teachers::model::Teacher;

/// A teacher with the students assigned to them, for `teachers.csv`.
#[derive(Debug, Clone, FromRow)]
pub struct TeacherExportRow {
    #[sqlx(flatten)]
    pub teacher: Teacher,
    pub students_count: i64,
    /// Full names joined with `"; "`, ordered by last name
    pub assigned_students: String,
}

pub const TEACHER_HEADERS: [&str; 13] = [
    "ID",
    "First Name",
    "Last Name",
    "Email",
    "Phone Number",
    "Subject Specialization",
    "Employee ID",
    "Date of Joining",
    "Status",
    "Students Count",
    "Assigned Students",
    "Created At",
    "Updated At",
];

pub const STUDENT_HEADERS: [&str; 13] = [
    "ID",
    "First Name",
    "Last Name",
    "Email",
    "Phone Number",
    "Roll Number",
    "Class Grade",
    "Date of Birth",
    "Admission Date",
    "Status",
    "Assigned Teacher",
    "Created At",
    "Updated At",
];

/// Columns of the combined sheet. Teacher rows fill `Employee ID / Roll Number`
/// with the employee id and `Subject / Class Grade` with the specialization.
pub const COMBINED_HEADERS: [&str; 12] = [
    "Type",
    "ID",
    "First Name",
    "Last Name",
    "Email",
    "Phone Number",
    "Employee ID / Roll Number",
    "Subject / Class Grade",
    "Status",
    "Assigned Teacher",
    "Created At",
    "Updated At",
];
