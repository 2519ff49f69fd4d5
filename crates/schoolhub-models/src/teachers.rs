//! Teacher records and DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use schoolhub_core::PaginationMeta;
use schoolhub_core::serde::empty_string_as_none;

use crate::common::RecordStatus;
use crate::ids::TeacherId;

/// Columns accepted by the `ordering` parameter on teacher lists.
pub const TEACHER_ORDERING_FIELDS: &[&str] = &["first_name", "last_name", "created_at"];

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Teacher {
    pub id: TeacherId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub subject_specialization: String,
    pub employee_id: String,
    pub date_of_joining: NaiveDate,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone, ToSchema, Validate)]
pub struct CreateTeacherDto {
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
    #[validate(length(
        min = 1,
        max = 100,
        message = "subject_specialization must be 1-100 characters"
    ))]
    pub subject_specialization: String,
    #[validate(length(min = 1, max = 20, message = "employee_id must be 1-20 characters"))]
    #[schema(example = "T100")]
    pub employee_id: String,
    #[schema(example = "2024-08-01")]
    pub date_of_joining: NaiveDate,
    #[serde(default)]
    pub status: RecordStatus,
}

/// Partial update; only provided fields change.
#[derive(Deserialize, Debug, Clone, Default, ToSchema, Validate)]
pub struct UpdateTeacherDto {
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
    #[validate(length(
        min = 1,
        max = 100,
        message = "subject_specialization must be 1-100 characters"
    ))]
    pub subject_specialization: Option<String>,
    #[validate(length(min = 1, max = 20, message = "employee_id must be 1-20 characters"))]
    pub employee_id: Option<String>,
    pub date_of_joining: Option<NaiveDate>,
    pub status: Option<RecordStatus>,
}

/// Filters for teacher lists and exports. Blank values are ignored.
#[derive(Deserialize, Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TeacherFilterParams {
    /// Case-insensitive substring match on name, email and employee id
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub status: Option<RecordStatus>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub subject_specialization: Option<String>,
    /// `first_name`, `last_name` or `created_at`; prefix with `-` for descending
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[param(example = "-created_at")]
    pub ordering: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct PaginatedTeachersResponse {
    pub data: Vec<Teacher>,
    pub meta: PaginationMeta,
}
