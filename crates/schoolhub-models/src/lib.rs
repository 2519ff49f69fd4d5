//! # SchoolHub Models
//!
//! Database records, request/response DTOs and validation rules.
//!
//! - [`auth`]: registration, login and token bodies
//! - [`common`]: [`RecordStatus`] shared by teachers and students
//! - [`ids`]: typed `Uuid` wrappers
//! - [`students`]: student records, DTOs and list filters
//! - [`teachers`]: teacher records, DTOs and list filters
//! - [`users`]: accounts and [`UserRole`]

pub mod auth;
pub mod common;
pub mod ids;
pub mod students;
pub mod teachers;
pub mod users;

pub use auth::{
    AccessTokenResponse, AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest,
    TokenPairResponse,
};
pub use common::RecordStatus;
pub use ids::{StudentId, TeacherId, UserId};
pub use students::{
    CreateStudentDto, PaginatedStudentsResponse, STUDENT_ORDERING_FIELDS, Student,
    StudentFilterParams, UpdateStudentDto,
};
pub use teachers::{
    CreateTeacherDto, PaginatedTeachersResponse, TEACHER_ORDERING_FIELDS, Teacher,
    TeacherFilterParams, UpdateTeacherDto,
};
pub use users::{User, UserRole};
