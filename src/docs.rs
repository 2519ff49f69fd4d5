use axum::Json;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use schoolhub_core::{PaginationMeta, PaginationParams};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    AccessTokenResponse, AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest,
    TokenPairResponse, User, UserRole,
};
use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, Student, UpdateStudentDto,
};
use crate::modules::teachers::model::{
    CreateTeacherDto, PaginatedTeachersResponse, Teacher, UpdateTeacherDto,
};
use schoolhub_models::RecordStatus;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_profile,
        crate::modules::auth::controller::obtain_token_pair,
        crate::modules::auth::controller::refresh_token,
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::list_teachers,
        crate::modules::teachers::controller::get_teacher,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::teachers::controller::get_teacher_students,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::list_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::exports::controller::export_teachers,
        crate::modules::exports::controller::export_students,
        crate::modules::exports::controller::export_all,
    ),
    components(
        schemas(
            User,
            UserRole,
            RecordStatus,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            TokenPairResponse,
            RefreshTokenRequest,
            AccessTokenResponse,
            ErrorResponse,
            Teacher,
            CreateTeacherDto,
            UpdateTeacherDto,
            PaginatedTeachersResponse,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            PaginatedStudentsResponse,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and JWT token endpoints"),
        (name = "Teachers", description = "Teacher records"),
        (name = "Students", description = "Student records"),
        (name = "Exports", description = "CSV exports")
    ),
    info(
        title = "SchoolHub API",
        version = "0.1.0",
        description = "Teacher and student records behind JWT authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

/// Serves the generated document at `/api-docs/openapi.json`.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
