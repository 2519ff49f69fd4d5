//! Student records and DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use schoolhub_core::PaginationMeta;
use schoolhub_core::serde::{double_option, empty_string_as_none};

use crate::common::RecordStatus;
use crate::ids::{StudentId, TeacherId};

/// Columns accepted by the `ordering` parameter on student lists.
pub const STUDENT_ORDERING_FIELDS: &[&str] = &["first_name", "last_name", "created_at"];

/// A student, joined with the display name of its assigned teacher.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Student {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub roll_number: String,
    pub class_grade: String,
    pub date_of_birth: NaiveDate,
    pub admission_date: NaiveDate,
    pub status: RecordStatus,
    pub assigned_teacher: Option<TeacherId>,
    /// `"<first> <last>"` of the assigned teacher
    pub assigned_teacher_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone, ToSchema, Validate)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 100, message = "first_name must be 1-100 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "last_name must be 1-100 characters"))]
    pub last_name: String,
    #[validate(
        email(message = "email must be a valid email address"),
        length(max = 254, message = "email must be at most 254 characters")
    )]
    pub email: String,
    #[validate(length(min = 1, max = 15, message = "phone_number must be 1-15 characters"))]
    pub phone_number: String,
    #[validate(length(min = 1, max = 20, message = "roll_number must be 1-20 characters"))]
    #[schema(example = "R2024-001")]
    pub roll_number: String,
    #[validate(length(min = 1, max = 20, message = "class_grade must be 1-20 characters"))]
    #[schema(example = "10")]
    pub class_grade: String,
    #[schema(example = "2010-04-12")]
    pub date_of_birth: NaiveDate,
    #[schema(example = "2024-09-01")]
    pub admission_date: NaiveDate,
    #[serde(default)]
    pub status: RecordStatus,
    pub assigned_teacher: Option<TeacherId>,
}

/// Partial update; only provided fields change.
///
/// `assigned_teacher` distinguishes an absent key (unchanged) from an
/// explicit `null` (unassign).
#[derive(Deserialize, Debug, Clone, Default, ToSchema, Validate)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, max = 100, message = "first_name must be 1-100 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "last_name must be 1-100 characters"))]
    pub last_name: Option<String>,
    #[validate(
        email(message = "email must be a valid email address"),
        length(max = 254, message = "email must be at most 254 characters")
    )]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 15, message = "phone_number must be 1-15 characters"))]
    pub phone_number: Option<String>,
    #[validate(length(min = 1, max = 20, message = "roll_number must be 1-20 characters"))]
    pub roll_number: Option<String>,
    #[validate(length(min = 1, max = 20, message = "class_grade must be 1-20 characters"))]
    pub class_grade: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub admission_date: Option<NaiveDate>,
    pub status: Option<RecordStatus>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, format = "uuid")]
    pub assigned_teacher: Option<Option<TeacherId>>,
}

/// Filters for student lists and exports. Blank values are ignored.
#[derive(Deserialize, Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentFilterParams {
    /// Case-insensitive substring match on name, email and roll number
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub status: Option<RecordStatus>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub class_grade: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub assigned_teacher: Option<TeacherId>,
    /// `first_name`, `last_name` or `created_at`; prefix with `-` for descending
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[param(example = "last_name")]
    pub ordering: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct PaginatedStudentsResponse {
    pub data: Vec<Student>,
    pub meta: PaginationMeta,
}
