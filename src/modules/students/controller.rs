use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use schoolhub_core::{AppError, PaginationParams};
use schoolhub_models::StudentId;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireStaff;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, Student, StudentFilterParams, UpdateStudentDto,
};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::validator::{ApiPath, ApiQuery, ValidatedJson};

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 400, description = "Validation error or unknown assigned_teacher", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin or teacher only", body = ErrorResponse),
        (status = 409, description = "Email or roll number already in use", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn create_student(
    State(state): State<AppState>,
    _staff: RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let student = StudentService::create_student(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    get,
    path = "/api/students",
    params(StudentFilterParams, PaginationParams),
    responses(
        (status = 200, description = "Paginated students", body = PaginatedStudentsResponse),
        (status = 400, description = "Invalid filter, ordering or pagination", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ApiQuery(filters): ApiQuery<StudentFilterParams>,
    ApiQuery(pagination): ApiQuery<PaginationParams>,
) -> Result<Json<PaginatedStudentsResponse>, AppError> {
    let students = StudentService::list_students(&state.db, &filters, &pagination).await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ApiPath(id): ApiPath<StudentId>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::get_student(&state.db, id).await?;
    Ok(Json(student))
}

/// Serves both `PUT` and `PATCH`. Sending `"assigned_teacher": null`
/// unassigns the student.
#[utoipa::path(
    patch,
    path = "/api/students/{id}",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 400, description = "Validation error or unknown assigned_teacher", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin or teacher only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 409, description = "Email or roll number already in use", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn update_student(
    State(state): State<AppState>,
    _staff: RequireStaff,
    ApiPath(id): ApiPath<StudentId>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::update_student(&state.db, id, dto).await?;
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin or teacher only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    _staff: RequireStaff,
    ApiPath(id): ApiPath<StudentId>,
) -> Result<StatusCode, AppError> {
    StudentService::delete_student(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
